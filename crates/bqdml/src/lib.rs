//! # bqdml
//!
//! Type-directed DML composition for BigQuery.
//!
//! Records are ordered column → value maps; the composer turns them into
//! `INSERT`, `UPDATE ... SET` and `WHERE` text, choosing the literal form of
//! each value from its kind:
//!
//! - `NULL` is bare
//! - text, dates and datetimes are single-quoted
//! - integers, floats and booleans are bare
//!
//! ```ignore
//! use bqdml::{Record, compose_insert, compose_where};
//!
//! let rows = vec![Record::new().with("a", "x").with("b", 1)];
//! assert_eq!(
//!     compose_insert("t", &rows)?,
//!     "INSERT t (a, b) VALUES ('x', 1)"
//! );
//!
//! let predicate = Record::new().with("a", "x").with("b", bqdml::FieldValue::Null);
//! assert_eq!(
//!     compose_where(&predicate, "AND")?,
//!     "WHERE a = 'x' AND b = NULL"
//! );
//! # Ok::<(), bqdml::DmlError>(())
//! ```
//!
//! The free functions reproduce the legacy output exactly, including unescaped
//! quotes in text literals. Use a configured [`Composer`] for escaping, strict
//! batch checking or `IS NULL` predicates.

pub mod compose;
pub mod config;
pub mod error;
pub mod executor;
pub mod literal;
pub mod monitor;
pub mod record;
pub mod value;

pub use compose::{
    Composer, Grouping, NullPredicate, SchemaCheck, WherePredicate, normalize_where_text,
};
pub use config::ComposerConfig;
pub use error::{DmlError, DmlResult};
pub use executor::{Executor, execute_statement, insert_records, update_records};
pub use literal::{LiteralMode, format_literal};
pub use monitor::{InstrumentedExecutor, MonitorConfig, StatsHook, TracingStatementHook};
pub use record::Record;
pub use value::{FieldKind, FieldValue};

/// Format values as a `", "`-joined literal list (legacy quoting).
pub fn format_value_list<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a FieldValue>,
{
    Composer::default().format_value_list(values)
}

/// Format a batch as `(v1, v2), (v1, v2)` (legacy quoting).
pub fn format_values_clause(records: &[Record]) -> String {
    Composer::default().format_values_clause(records)
}

/// Compose `INSERT {table} ({columns}) VALUES {values}`; columns come from
/// the first record.
pub fn compose_insert(table: &str, records: &[Record]) -> DmlResult<String> {
    Composer::default().compose_insert(table, records)
}

/// Compose `WHERE c1 = v1 {grouping} c2 = v2 ...`.
pub fn compose_where(predicate: &Record, grouping: &str) -> DmlResult<String> {
    Composer::default().compose_where(predicate, grouping)
}

/// Compose a SET clause body: `c1 = v1, c2 = v2`.
pub fn compose_update_set_clause(record: &Record) -> String {
    Composer::default().compose_update_set_clause(record)
}

/// Compose `UPDATE {table} SET ... WHERE ...` from pre-rendered WHERE text.
pub fn compose_update(table: &str, record: &Record, where_text: &str) -> DmlResult<String> {
    Composer::default().compose_update(table, record, where_text)
}
