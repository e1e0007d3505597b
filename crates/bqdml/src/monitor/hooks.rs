use super::truncate_sql_bytes;
use super::types::{
    HookAction, StatementContext, StatementHook, StatementKind, StatementOutcome,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::Level;

/// A `tracing` hook that emits each statement before it is executed.
#[derive(Debug, Clone)]
pub struct TracingStatementHook {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingStatementHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingStatementHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN => tracing::warn!($($field)*),
            Level::INFO => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl StatementHook for TracingStatementHook {
    fn before_statement(&self, ctx: &StatementContext) -> HookAction {
        let sql = self.truncate_sql(&ctx.sql);
        emit_at_level!(
            self.level,
            target: "bqdml.sql",
            kind = ?ctx.kind,
            sql = %sql,
            "executing statement"
        );
        HookAction::Continue
    }

    fn on_slow_statement(&self, ctx: &StatementContext, duration: Duration) {
        tracing::warn!(
            target: "bqdml.sql",
            kind = ?ctx.kind,
            ?duration,
            sql = %self.truncate_sql(&ctx.sql),
            "slow statement"
        );
    }
}

/// A hook that counts executed statements.
#[derive(Debug, Default)]
pub struct StatsHook {
    total_statements: AtomicU64,
    failed_statements: AtomicU64,
    slow_statements: AtomicU64,
    affected_rows: AtomicU64,
    insert_count: AtomicU64,
    update_count: AtomicU64,
    total_duration_nanos: AtomicU64,
}

/// Snapshot of [`StatsHook`] counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementStats {
    /// Statements that completed (success or failure).
    pub total_statements: u64,
    pub failed_statements: u64,
    pub slow_statements: u64,
    /// Sum of affected rows over successful statements.
    pub affected_rows: u64,
    pub insert_count: u64,
    pub update_count: u64,
    pub total_duration: Duration,
}

impl StatsHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    pub fn stats(&self) -> StatementStats {
        StatementStats {
            total_statements: self.total_statements.load(Ordering::Relaxed),
            failed_statements: self.failed_statements.load(Ordering::Relaxed),
            slow_statements: self.slow_statements.load(Ordering::Relaxed),
            affected_rows: self.affected_rows.load(Ordering::Relaxed),
            insert_count: self.insert_count.load(Ordering::Relaxed),
            update_count: self.update_count.load(Ordering::Relaxed),
            total_duration: Duration::from_nanos(self.total_duration_nanos.load(Ordering::Relaxed)),
        }
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        self.total_statements.store(0, Ordering::Relaxed);
        self.failed_statements.store(0, Ordering::Relaxed);
        self.slow_statements.store(0, Ordering::Relaxed);
        self.affected_rows.store(0, Ordering::Relaxed);
        self.insert_count.store(0, Ordering::Relaxed);
        self.update_count.store(0, Ordering::Relaxed);
        self.total_duration_nanos.store(0, Ordering::Relaxed);
    }
}

impl StatementHook for StatsHook {
    fn after_statement(
        &self,
        ctx: &StatementContext,
        duration: Duration,
        outcome: &StatementOutcome,
    ) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_statements.fetch_add(1, Ordering::Relaxed);
        self.total_duration_nanos.fetch_add(nanos, Ordering::Relaxed);

        match ctx.kind {
            StatementKind::Insert => {
                self.insert_count.fetch_add(1, Ordering::Relaxed);
            }
            StatementKind::Update => {
                self.update_count.fetch_add(1, Ordering::Relaxed);
            }
            StatementKind::Other => {}
        }

        match outcome {
            StatementOutcome::Affected(n) => {
                self.affected_rows.fetch_add(*n, Ordering::Relaxed);
            }
            StatementOutcome::Error(_) => {
                self.failed_statements.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn on_slow_statement(&self, _ctx: &StatementContext, _duration: Duration) {
        self.slow_statements.fetch_add(1, Ordering::Relaxed);
    }
}
