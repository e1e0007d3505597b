//! Ordered column → value mapping used as the input to every statement.

use crate::error::{DmlError, DmlResult};
use crate::value::FieldValue;

/// An ordered mapping from column name to [`FieldValue`].
///
/// Iteration yields columns in insertion order, which is the order values are
/// emitted in generated SQL. Setting an existing column replaces its value in
/// place without moving it.
///
/// # Example
/// ```ignore
/// use bqdml::Record;
///
/// let row = Record::new()
///     .with("product", "oven")
///     .with("quantity", 5);
/// assert_eq!(row.columns().collect::<Vec<_>>(), ["product", "quantity"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Set a column value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    /// Chaining form of [`Record::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Whether `other` has exactly the same columns in the same order.
    pub fn same_columns(&self, other: &Record) -> bool {
        self.len() == other.len() && self.columns().eq(other.columns())
    }

    /// Build a record from a JSON object, keeping the object's key order.
    pub fn from_json_object(
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> DmlResult<Self> {
        let mut record = Self::with_capacity(object.len());
        for (column, value) in object {
            let value = FieldValue::from_json(value).map_err(|e| match e {
                DmlError::InvalidArgument(msg) => {
                    DmlError::invalid_argument(format!("column '{column}': {msg}"))
                }
                other => other,
            })?;
            record.set(column.as_str(), value);
        }
        Ok(record)
    }

    /// Reject records containing an empty column name.
    pub(crate) fn check_column_names(&self) -> DmlResult<()> {
        if self.columns().any(str::is_empty) {
            return Err(DmlError::invalid_argument("column name cannot be empty"));
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.set(column, value);
        }
        record
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a str, &'a FieldValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a FieldValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preserves_insertion_order() {
        let r = Record::new().with("z", 1).with("a", 2).with("m", 3);
        assert_eq!(r.columns().collect::<Vec<_>>(), ["z", "a", "m"]);
    }

    #[test]
    fn set_existing_replaces_in_place() {
        let mut r = Record::new().with("a", 1).with("b", 2);
        r.set("a", "x");
        assert_eq!(r.columns().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(r.get("a"), Some(&FieldValue::Text("x".into())));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn same_columns_checks_order() {
        let a = Record::new().with("a", 1).with("b", 2);
        let b = Record::new().with("b", 1).with("a", 2);
        let c = Record::new().with("a", 3).with("b", 4);
        assert!(!a.same_columns(&b));
        assert!(a.same_columns(&c));
    }

    #[test]
    fn from_json_keeps_key_order() {
        let value = json!({"zeta": "x", "alpha": 1, "mid": null});
        let r = Record::from_json_object(value.as_object().unwrap()).unwrap();
        assert_eq!(r.columns().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(r.get("mid"), Some(&FieldValue::Null));
    }

    #[test]
    fn from_json_names_offending_column() {
        let value = json!({"tags": ["a"]});
        let err = Record::from_json_object(value.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("column 'tags'"));
    }

    #[test]
    fn empty_column_name_rejected() {
        let r = Record::new().with("", 1);
        assert!(r.check_column_names().unwrap_err().is_invalid_argument());
    }
}
