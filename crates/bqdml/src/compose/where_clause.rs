//! WHERE clause composition (equality conditions only).

use super::{Composer, log_composed};
use crate::error::{DmlError, DmlResult};
use crate::literal::write_literal;
use crate::record::Record;
use crate::value::FieldValue;
use serde::Deserialize;
use std::fmt;

/// Boolean connective applied uniformly between WHERE conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grouping {
    #[default]
    And,
    Or,
}

impl Grouping {
    /// Parse `AND` / `OR`, case-insensitively.
    pub fn parse(token: &str) -> DmlResult<Self> {
        if token.eq_ignore_ascii_case("AND") {
            Ok(Grouping::And)
        } else if token.eq_ignore_ascii_case("OR") {
            Ok(Grouping::Or)
        } else {
            Err(DmlError::invalid_argument(format!(
                "grouping must be AND or OR, got '{token}'"
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::And => "AND",
            Grouping::Or => "OR",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Grouping {
    type Err = DmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grouping::parse(s)
    }
}

/// How a NULL value is compared in a WHERE condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPredicate {
    /// `column = NULL`, which never matches a row in standard SQL.
    #[default]
    Equals,
    /// `column IS NULL`.
    IsNull,
}

/// Equality conditions joined by a single [`Grouping`].
///
/// # Example
/// ```ignore
/// use bqdml::WherePredicate;
///
/// let predicate = WherePredicate::and()
///     .eq("id", 1)
///     .eq("status", "active");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WherePredicate {
    pub conditions: Record,
    pub grouping: Grouping,
}

impl WherePredicate {
    pub fn new(grouping: Grouping) -> Self {
        Self {
            conditions: Record::new(),
            grouping,
        }
    }

    /// Conditions joined with `AND`.
    pub fn and() -> Self {
        Self::new(Grouping::And)
    }

    /// Conditions joined with `OR`.
    pub fn or() -> Self {
        Self::new(Grouping::Or)
    }

    /// Wrap an existing record of conditions.
    pub fn from_record(conditions: Record, grouping: Grouping) -> Self {
        Self {
            conditions,
            grouping,
        }
    }

    /// Add a `column = value` condition.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.conditions.set(column, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Composer {
    /// Compose `WHERE c1 = v1 {grouping} c2 = v2 ...`.
    ///
    /// `grouping` is validated case-insensitively and then emitted exactly as
    /// supplied.
    pub fn compose_where(&self, predicate: &Record, grouping: &str) -> DmlResult<String> {
        if predicate.is_empty() {
            return Err(DmlError::invalid_argument(
                "WHERE dictionary cannot be empty",
            ));
        }
        Grouping::parse(grouping)?;
        predicate.check_column_names()?;

        let mut out = String::from("WHERE ");
        self.write_conditions(&mut out, predicate, grouping);
        log_composed("where", 1, &out);
        Ok(out)
    }

    /// Compose a WHERE clause from a structured predicate.
    pub fn compose_where_predicate(&self, predicate: &WherePredicate) -> DmlResult<String> {
        self.compose_where(&predicate.conditions, predicate.grouping.as_str())
    }

    fn write_conditions(&self, out: &mut String, predicate: &Record, joiner: &str) {
        for (i, (column, value)) in predicate.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(joiner);
                out.push(' ');
            }
            out.push_str(column);
            if value.is_null() && self.null_predicate == NullPredicate::IsNull {
                out.push_str(" IS NULL");
            } else {
                out.push_str(" = ");
                write_literal(out, value, self.literal_mode);
            }
        }
    }
}
