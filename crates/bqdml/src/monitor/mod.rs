//! Statement execution monitoring and hooks.
//!
//! This module provides:
//! - Hooks around statement execution (before/after, slow statements)
//! - A `tracing` hook that logs each statement before it runs
//! - Execution statistics
//! - Statement timeouts
//!
//! # Example
//!
//! ```rust,ignore
//! use bqdml::monitor::{InstrumentedExecutor, MonitorConfig, StatsHook, TracingStatementHook};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let stats = Arc::new(StatsHook::new());
//! let executor = InstrumentedExecutor::new(warehouse)
//!     .with_config(
//!         MonitorConfig::new()
//!             .with_statement_timeout(Duration::from_secs(30))
//!             .with_slow_statement_threshold(Duration::from_secs(5)),
//!     )
//!     .with_hook(TracingStatementHook::new())
//!     .with_hook_arc(stats.clone());
//! ```

mod config;
mod hooks;
mod instrumented;
mod types;

#[cfg(test)]
mod tests;

pub use config::MonitorConfig;
pub use hooks::{StatementStats, StatsHook, TracingStatementHook};
pub use instrumented::InstrumentedExecutor;
pub use types::{HookAction, StatementContext, StatementHook, StatementKind, StatementOutcome};

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
