use super::*;
use crate::error::{DmlError, DmlResult};
use crate::executor::Executor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Executor that records statements and answers with a fixed count.
struct FakeExecutor {
    affected: Option<u64>,
    delay: Option<Duration>,
    fail: bool,
    seen: Mutex<Vec<String>>,
}

impl FakeExecutor {
    fn new(affected: Option<u64>) -> Self {
        Self {
            affected,
            delay: None,
            fail: false,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Executor for FakeExecutor {
    async fn execute(&self, statement: &str) -> DmlResult<Option<u64>> {
        self.seen.lock().unwrap().push(statement.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(DmlError::execution("syntax error"));
        }
        Ok(self.affected)
    }
}

struct DenyUpdates;

impl StatementHook for DenyUpdates {
    fn before_statement(&self, ctx: &StatementContext) -> HookAction {
        if ctx.kind == StatementKind::Update {
            HookAction::Abort("updates disabled".to_string())
        } else {
            HookAction::Continue
        }
    }
}

#[test]
fn test_statement_kind_detection() {
    assert_eq!(StatementKind::from_sql("INSERT t (a) VALUES (1)"), StatementKind::Insert);
    assert_eq!(StatementKind::from_sql("  update t SET a = 1"), StatementKind::Update);
    assert_eq!(StatementKind::from_sql("UPDATED_AT"), StatementKind::Other);
    assert_eq!(StatementKind::from_sql("SELECT 1"), StatementKind::Other);
}

#[test]
fn test_truncate_sql_bytes_char_boundary() {
    assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    assert_eq!(truncate_sql_bytes("abcdef", 3), "abc");
    // "é" is two bytes; cutting inside it backs off.
    assert_eq!(truncate_sql_bytes("aé", 2), "a");
}

#[test]
fn test_outcome_error_truncated() {
    let outcome = StatementOutcome::error("x".repeat(600));
    match outcome {
        StatementOutcome::Error(msg) => {
            assert_eq!(msg.len(), 512 + 3);
            assert!(msg.ends_with("..."));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_tracing_hook_truncation() {
    let hook = TracingStatementHook::new().max_sql_length(5);
    assert_eq!(hook.truncate_sql("INSERT t"), "INSER...");
    let hook = TracingStatementHook::new().no_truncate();
    assert_eq!(hook.truncate_sql("INSERT t"), "INSERT t");
}

#[tokio::test]
async fn test_instrumented_passes_through_and_counts() {
    let stats = Arc::new(StatsHook::new());
    let executor = InstrumentedExecutor::new(FakeExecutor::new(Some(3)))
        .with_hook(TracingStatementHook::new())
        .with_hook_arc(stats.clone());

    let affected = executor.execute("INSERT t (a) VALUES (1), (2), (3)").await.unwrap();
    assert_eq!(affected, Some(3));
    executor.execute("UPDATE t SET a = 1 WHERE b = 2").await.unwrap();

    let s = stats.stats();
    assert_eq!(s.total_statements, 2);
    assert_eq!(s.insert_count, 1);
    assert_eq!(s.update_count, 1);
    assert_eq!(s.affected_rows, 6);
    assert_eq!(s.failed_statements, 0);
    assert_eq!(executor.inner().seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_instrumented_counts_failures() {
    let stats = Arc::new(StatsHook::new());
    let mut inner = FakeExecutor::new(None);
    inner.fail = true;
    let executor = InstrumentedExecutor::new(inner).with_hook_arc(stats.clone());

    let err = executor.execute("INSERT t (a) VALUES (1)").await.unwrap_err();
    assert!(matches!(err, DmlError::Execution(_)));
    assert_eq!(stats.stats().failed_statements, 1);

    stats.reset();
    assert_eq!(stats.stats(), StatementStats::default());
}

#[tokio::test]
async fn test_hook_abort_skips_execution() {
    let executor = InstrumentedExecutor::new(FakeExecutor::new(Some(1))).with_hook(DenyUpdates);

    let err = executor.execute("UPDATE t SET a = 1 WHERE b = 2").await.unwrap_err();
    assert!(matches!(err, DmlError::Aborted(ref reason) if reason == "updates disabled"));
    assert!(executor.inner().seen.lock().unwrap().is_empty());

    assert_eq!(
        executor.execute("INSERT t (a) VALUES (1)").await.unwrap(),
        Some(1)
    );
}

#[tokio::test(start_paused = true)]
async fn test_timeout() {
    let mut inner = FakeExecutor::new(Some(1));
    inner.delay = Some(Duration::from_secs(60));
    let stats = Arc::new(StatsHook::new());
    let executor = InstrumentedExecutor::new(inner)
        .with_statement_timeout(Duration::from_secs(1))
        .with_hook_arc(stats.clone());

    let err = executor.execute("INSERT t (a) VALUES (1)").await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(stats.stats().failed_statements, 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_statement_reported() {
    let mut inner = FakeExecutor::new(Some(1));
    inner.delay = Some(Duration::from_millis(500));
    let stats = Arc::new(StatsHook::new());
    let executor = InstrumentedExecutor::new(inner)
        .with_config(
            MonitorConfig::new().with_slow_statement_threshold(Duration::from_millis(100)),
        )
        .with_hook_arc(stats.clone());

    executor.execute("INSERT t (a) VALUES (1)").await.unwrap();
    assert_eq!(stats.stats().slow_statements, 1);
}
