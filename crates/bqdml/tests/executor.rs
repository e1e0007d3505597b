//! Compose-and-execute helpers against an in-memory executor.

use bqdml::{
    Composer, DmlError, DmlResult, Executor, FieldValue, InstrumentedExecutor, LiteralMode,
    Record, StatsHook, WherePredicate, execute_statement, insert_records, update_records,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingExecutor {
    reply: Option<u64>,
    statements: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    fn replying(reply: Option<u64>) -> Self {
        Self {
            reply,
            statements: Mutex::new(Vec::new()),
        }
    }

    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

impl Executor for RecordingExecutor {
    async fn execute(&self, statement: &str) -> DmlResult<Option<u64>> {
        self.statements.lock().unwrap().push(statement.to_string());
        Ok(self.reply)
    }
}

fn inventory() -> Vec<Record> {
    vec![
        Record::new()
            .with("product", "top load washer")
            .with("quantity", 10),
        Record::new().with("product", "oven").with("quantity", 5),
    ]
}

#[tokio::test]
async fn insert_records_executes_composed_statement() {
    let executor = RecordingExecutor::replying(Some(2));
    let affected = insert_records(&executor, &Composer::default(), "dataset.inventory", &inventory())
        .await
        .unwrap();

    assert_eq!(affected, 2);
    assert_eq!(
        executor.statements(),
        vec![
            "INSERT dataset.inventory (product, quantity) VALUES ('top load washer', 10), ('oven', 5)"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn missing_affected_count_reads_as_zero() {
    let executor = RecordingExecutor::replying(None);
    let affected = insert_records(&executor, &Composer::default(), "t", &inventory())
        .await
        .unwrap();
    assert_eq!(affected, 0);

    let affected = execute_statement(&executor, "UPDATE t SET a = 1 WHERE b = 2")
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn composition_errors_never_reach_the_executor() {
    let executor = RecordingExecutor::default();
    let err = insert_records(&executor, &Composer::default(), "t", &[])
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = update_records(
        &executor,
        &Composer::default(),
        "t",
        &Record::new().with("a", 1),
        &WherePredicate::and(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DmlError::InvalidArgument(_)));

    assert!(executor.statements().is_empty());
}

#[tokio::test]
async fn update_records_uses_structured_predicate() {
    let executor = RecordingExecutor::replying(Some(1));
    let composer = Composer::new().with_literal_mode(LiteralMode::Escaped);
    let record = Record::new()
        .with("owner", "O'Neil")
        .with("closed_at", FieldValue::Null);
    let predicate = WherePredicate::and().eq("id", 42).eq("region", "us");

    let affected = update_records(&executor, &composer, "dataset.accounts", &record, &predicate)
        .await
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(
        executor.statements(),
        vec![
            r"UPDATE dataset.accounts SET owner = 'O\'Neil', closed_at = NULL WHERE id = 42 AND region = 'us'"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn instrumented_executor_composes_with_helpers() {
    let stats = Arc::new(StatsHook::new());
    let executor =
        InstrumentedExecutor::new(RecordingExecutor::replying(Some(2))).with_hook_arc(stats.clone());

    insert_records(&executor, &Composer::default(), "t", &inventory())
        .await
        .unwrap();

    let s = stats.stats();
    assert_eq!(s.insert_count, 1);
    assert_eq!(s.affected_rows, 2);
    assert_eq!(executor.inner().statements().len(), 1);
}
