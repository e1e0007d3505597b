use super::{Composer, SchemaCheck, log_composed};
use crate::error::{DmlError, DmlResult};
use crate::literal::write_value_list;
use crate::record::Record;
use crate::value::FieldValue;

impl Composer {
    /// Format a list of values as `", "`-joined literals.
    pub fn format_value_list<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = &'a FieldValue>,
    {
        crate::literal::format_value_list(values, self.literal_mode)
    }

    /// Format a batch as `(v1, v2), (v1, v2)`.
    ///
    /// Each record contributes its values in its own column order. Nothing
    /// checks that the groups line up; see [`SchemaCheck::Strict`].
    pub fn format_values_clause(&self, records: &[Record]) -> String {
        let mut out = String::new();
        for (i, record) in records.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_row(&mut out, record.values());
        }
        out
    }

    /// Compose `INSERT {table} ({columns}) VALUES {values}`.
    ///
    /// The column list comes from the first record.
    pub fn compose_insert(&self, table: &str, records: &[Record]) -> DmlResult<String> {
        let first = records.first().ok_or_else(|| {
            DmlError::invalid_argument("INSERT requires at least one record")
        })?;
        if first.is_empty() {
            return Err(DmlError::invalid_argument(
                "INSERT record must have at least one column",
            ));
        }
        first.check_column_names()?;

        if self.schema_check == SchemaCheck::Strict {
            check_uniform_columns(first, records)?;
        }

        let columns = first.columns().collect::<Vec<_>>().join(", ");
        let values = self.format_values_clause(records);
        let sql = format!("INSERT {table} ({columns}) VALUES {values}");
        log_composed("insert", records.len(), &sql);
        Ok(sql)
    }

    /// Compose an INSERT with an explicit shared column list.
    ///
    /// Values are looked up by name in every record, so record column order
    /// does not matter. A record missing a listed column, or carrying a column
    /// not in the list, fails with [`DmlError::SchemaInconsistency`].
    pub fn compose_insert_with_columns<S>(
        &self,
        table: &str,
        columns: &[S],
        records: &[Record],
    ) -> DmlResult<String>
    where
        S: AsRef<str>,
    {
        if columns.is_empty() {
            return Err(DmlError::invalid_argument(
                "INSERT column list cannot be empty",
            ));
        }
        if records.is_empty() {
            return Err(DmlError::invalid_argument(
                "INSERT requires at least one record",
            ));
        }
        for (i, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            if column.is_empty() {
                return Err(DmlError::invalid_argument("column name cannot be empty"));
            }
            if columns[..i].iter().any(|c| c.as_ref() == column) {
                return Err(DmlError::invalid_argument(format!(
                    "duplicate column '{column}' in INSERT column list"
                )));
            }
        }

        let mut values = String::new();
        for (index, record) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(columns.len());
            for column in columns {
                let column = column.as_ref();
                let value = record.get(column).ok_or_else(|| {
                    DmlError::schema_inconsistency(index, format!("missing column '{column}'"))
                })?;
                row.push(value);
            }
            if let Some(extra) = record
                .columns()
                .find(|c| !columns.iter().any(|listed| listed.as_ref() == *c))
            {
                return Err(DmlError::schema_inconsistency(
                    index,
                    format!("unexpected column '{extra}'"),
                ));
            }

            if index > 0 {
                values.push_str(", ");
            }
            self.write_row(&mut values, row);
        }

        let columns = columns
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");
        let sql = format!("INSERT {table} ({columns}) VALUES {values}");
        log_composed("insert", records.len(), &sql);
        Ok(sql)
    }

    fn write_row<'a, I>(&self, out: &mut String, values: I)
    where
        I: IntoIterator<Item = &'a FieldValue>,
    {
        out.push('(');
        write_value_list(out, values, self.literal_mode);
        out.push(')');
    }
}

fn check_uniform_columns(first: &Record, records: &[Record]) -> DmlResult<()> {
    for (index, record) in records.iter().enumerate().skip(1) {
        if !first.same_columns(record) {
            return Err(DmlError::schema_inconsistency(
                index,
                format!(
                    "expected columns ({}), found ({})",
                    first.columns().collect::<Vec<_>>().join(", "),
                    record.columns().collect::<Vec<_>>().join(", ")
                ),
            ));
        }
    }
    Ok(())
}
