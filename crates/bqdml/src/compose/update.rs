use super::where_clause::WherePredicate;
use super::{Composer, log_composed};
use crate::error::{DmlError, DmlResult};
use crate::literal::write_literal;
use crate::record::Record;

impl Composer {
    /// Compose a SET clause body: `c1 = v1, c2 = v2`.
    ///
    /// NULL is always assigned as `c = NULL`.
    pub fn compose_update_set_clause(&self, record: &Record) -> String {
        let mut out = String::new();
        for (i, (column, value)) in record.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(column);
            out.push_str(" = ");
            write_literal(&mut out, value, self.literal_mode);
        }
        out
    }

    /// Compose `UPDATE {table} SET ... WHERE ...` from pre-rendered WHERE text.
    ///
    /// The text goes through [`normalize_where_text`]. Prefer
    /// [`Composer::compose_update_where`], which renders the predicate itself.
    pub fn compose_update(
        &self,
        table: &str,
        record: &Record,
        where_text: &str,
    ) -> DmlResult<String> {
        check_set_record(record)?;
        let condition = normalize_where_text(where_text);
        if condition.is_empty() {
            return Err(DmlError::invalid_argument(
                "UPDATE requires a non-empty WHERE condition",
            ));
        }

        let set = self.compose_update_set_clause(record);
        let sql = format!("UPDATE {table} SET {set} WHERE {condition}");
        log_composed("update", 1, &sql);
        Ok(sql)
    }

    /// Compose `UPDATE {table} SET ... WHERE ...` from a structured predicate.
    pub fn compose_update_where(
        &self,
        table: &str,
        record: &Record,
        predicate: &WherePredicate,
    ) -> DmlResult<String> {
        check_set_record(record)?;
        let where_clause = self.compose_where_predicate(predicate)?;

        let set = self.compose_update_set_clause(record);
        let sql = format!("UPDATE {table} SET {set} {where_clause}");
        log_composed("update", 1, &sql);
        Ok(sql)
    }
}

fn check_set_record(record: &Record) -> DmlResult<()> {
    if record.is_empty() {
        return Err(DmlError::invalid_argument(
            "UPDATE requires at least one SET column",
        ));
    }
    record.check_column_names()
}

/// Normalize WHERE text for [`Composer::compose_update`].
///
/// Trims the text, strips one leading `WHERE` keyword (any case) and the
/// whitespace after it, then turns every `"` into `'`. This is plain text
/// substitution: double quotes inside string literals are rewritten too.
pub fn normalize_where_text(text: &str) -> String {
    let trimmed = text.trim();
    let condition = strip_where_keyword(trimmed).unwrap_or(trimmed).trim_start();
    condition.replace('"', "'")
}

fn strip_where_keyword(s: &str) -> Option<&str> {
    const KEYWORD: &str = "WHERE";

    let head = s.get(..KEYWORD.len())?;
    if !head.eq_ignore_ascii_case(KEYWORD) {
        return None;
    }
    let rest = &s[KEYWORD.len()..];
    match rest.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}
