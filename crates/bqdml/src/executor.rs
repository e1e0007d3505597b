//! Executor trait for submitting composed statements to the warehouse.
//!
//! The crate does not ship a warehouse client. Implement [`Executor`] over the
//! client you use; [`insert_records`] and [`update_records`] compose a
//! statement, run it and report the affected-row count.

use crate::compose::{Composer, WherePredicate};
use crate::error::DmlResult;
use crate::record::Record;

/// Submits statement text and waits for it to finish.
pub trait Executor: Send + Sync {
    /// Execute `statement` and return the affected-row count, if the warehouse
    /// reports one.
    fn execute(
        &self,
        statement: &str,
    ) -> impl std::future::Future<Output = DmlResult<Option<u64>>> + Send;
}

/// Execute an already composed statement; a missing count reads as 0.
pub async fn execute_statement<E: Executor>(executor: &E, statement: &str) -> DmlResult<u64> {
    let affected = executor.execute(statement).await?.unwrap_or(0);
    tracing::info!(target: "bqdml", affected, "statement finished");
    Ok(affected)
}

/// Compose an INSERT for `records`, execute it and return the affected rows.
pub async fn insert_records<E: Executor>(
    executor: &E,
    composer: &Composer,
    table: &str,
    records: &[Record],
) -> DmlResult<u64> {
    let sql = composer.compose_insert(table, records)?;
    let affected = executor.execute(&sql).await?.unwrap_or(0);
    tracing::info!(target: "bqdml", table, rows = records.len(), affected, "insert finished");
    Ok(affected)
}

/// Compose an UPDATE for `record` filtered by `predicate`, execute it and
/// return the affected rows.
pub async fn update_records<E: Executor>(
    executor: &E,
    composer: &Composer,
    table: &str,
    record: &Record,
    predicate: &WherePredicate,
) -> DmlResult<u64> {
    let sql = composer.compose_update_where(table, record, predicate)?;
    let affected = executor.execute(&sql).await?.unwrap_or(0);
    tracing::info!(target: "bqdml", table, affected, "update finished");
    Ok(affected)
}
