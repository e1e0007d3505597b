//! Statement composition: INSERT, UPDATE and WHERE text from [`Record`]s.
//!
//! [`Composer`] carries the options that change rendering; the crate-level
//! free functions (`bqdml::compose_insert`, ...) use [`Composer::default`],
//! which reproduces the legacy output byte for byte.
//!
//! # Example
//! ```ignore
//! use bqdml::{Composer, LiteralMode, Record, SchemaCheck};
//!
//! let rows = vec![
//!     Record::new().with("product", "oven").with("quantity", 5),
//!     Record::new().with("product", "washer").with("quantity", 10),
//! ];
//!
//! let composer = Composer::new()
//!     .with_literal_mode(LiteralMode::Escaped)
//!     .with_schema_check(SchemaCheck::Strict);
//! let sql = composer.compose_insert("dataset.inventory", &rows)?;
//! ```

mod insert;
mod update;
mod where_clause;


pub use update::normalize_where_text;
pub use where_clause::{Grouping, NullPredicate, WherePredicate};

use crate::literal::LiteralMode;
use crate::monitor::truncate_sql_bytes;
use serde::Deserialize;

/// Longest statement prefix (in bytes) included in composition logs.
const LOG_SQL_MAX_LEN: usize = 200;

/// Whether an INSERT batch is checked for uniform columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaCheck {
    /// Take the first record's columns and trust the rest of the batch.
    #[default]
    Off,
    /// Require every record to have the first record's columns, in order.
    Strict,
}

/// Renders records into DML text.
///
/// `Composer` is a plain value: it holds no state between calls and can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composer {
    /// How quoted literals are written.
    pub literal_mode: LiteralMode,
    /// Batch column checking for INSERT.
    pub schema_check: SchemaCheck,
    /// How NULL values are compared in WHERE clauses.
    pub null_predicate: NullPredicate,
}

impl Composer {
    /// Create a composer with legacy defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the literal mode.
    pub fn with_literal_mode(mut self, mode: LiteralMode) -> Self {
        self.literal_mode = mode;
        self
    }

    /// Set INSERT batch checking.
    pub fn with_schema_check(mut self, check: SchemaCheck) -> Self {
        self.schema_check = check;
        self
    }

    /// Set how NULL is compared in WHERE clauses.
    pub fn with_null_predicate(mut self, predicate: NullPredicate) -> Self {
        self.null_predicate = predicate;
        self
    }
}

fn log_composed(kind: &'static str, rows: usize, sql: &str) {
    let truncated = truncate_sql_bytes(sql, LOG_SQL_MAX_LEN);
    if truncated.len() < sql.len() {
        tracing::debug!(target: "bqdml.sql", kind, rows, sql = %truncated, "composed statement (truncated)");
    } else {
        tracing::debug!(target: "bqdml.sql", kind, rows, sql = %truncated, "composed statement");
    }
}
