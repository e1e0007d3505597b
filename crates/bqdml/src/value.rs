//! Typed scalar values that can be rendered as warehouse literals.

use crate::error::{DmlError, DmlResult};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// A single scalar value belonging to one record field.
///
/// The variant decides how the value is rendered into SQL text; see
/// [`crate::literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL NULL
    Null,
    /// String value, rendered quoted
    Text(String),
    /// Calendar date, rendered quoted as `YYYY-MM-DD`
    Date(NaiveDate),
    /// Date and time without zone, rendered quoted
    DateTime(NaiveDateTime),
    /// 64-bit integer, rendered bare
    Integer(i64),
    /// 64-bit float, rendered bare
    Float(f64),
    /// Boolean, rendered bare
    Boolean(bool),
}

/// The kind of a [`FieldValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Null,
    Text,
    Date,
    DateTime,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Null => "null",
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

impl FieldValue {
    /// Return the kind tag of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Null => FieldKind::Null,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::DateTime(_) => FieldKind::DateTime,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Whether the literal form of this value is wrapped in single quotes.
    pub fn is_quoted(&self) -> bool {
        matches!(
            self,
            FieldValue::Text(_) | FieldValue::Date(_) | FieldValue::DateTime(_)
        )
    }

    /// Convert a JSON scalar into a field value.
    ///
    /// Strings become [`FieldValue::Text`]; numbers that fit `i64` become
    /// [`FieldValue::Integer`], integers beyond the `i64` range are rejected,
    /// and fractional numbers become [`FieldValue::Float`]. Arrays and objects
    /// are rejected.
    pub fn from_json(value: &serde_json::Value) -> DmlResult<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FieldValue::Integer(i))
                } else if n.is_u64() {
                    Err(DmlError::invalid_argument(format!(
                        "integer {n} out of range for INT64"
                    )))
                } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                    Ok(FieldValue::Float(f))
                } else {
                    Err(DmlError::invalid_argument(format!(
                        "number {n} cannot be represented as integer or float"
                    )))
                }
            }
            Value::Array(_) => Err(DmlError::invalid_argument(
                "unsupported field kind: array",
            )),
            Value::Object(_) => Err(DmlError::invalid_argument(
                "unsupported field kind: object",
            )),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::DateTime(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(i64::from(v))
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Integer(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(f64::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}
