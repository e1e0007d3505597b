//! Command bodies. Each takes already-parsed JSON so it can be tested without I/O.

use bqdml::{Composer, Grouping, WherePredicate};
use serde_json::Value;

use crate::input::{record_from_json, records_from_json};

pub fn compose_insert(
    composer: &Composer,
    table: &str,
    records: &Value,
    columns: Option<&[String]>,
) -> anyhow::Result<String> {
    let records = records_from_json(records)?;
    let sql = match columns {
        Some(columns) => composer.compose_insert_with_columns(table, columns, &records)?,
        None => composer.compose_insert(table, &records)?,
    };
    Ok(sql)
}

pub fn compose_where(composer: &Composer, predicate: &Value, grouping: &str) -> anyhow::Result<String> {
    let predicate = record_from_json(predicate)?;
    Ok(composer.compose_where(&predicate, grouping)?)
}

/// Either a JSON predicate with its grouping, or raw WHERE text.
pub enum UpdateCondition<'a> {
    Predicate { value: &'a Value, grouping: &'a str },
    Sql(&'a str),
}

pub fn compose_update(
    composer: &Composer,
    table: &str,
    set: &Value,
    condition: UpdateCondition<'_>,
) -> anyhow::Result<String> {
    let record = record_from_json(set)?;
    let sql = match condition {
        UpdateCondition::Predicate { value, grouping } => {
            let predicate =
                WherePredicate::from_record(record_from_json(value)?, Grouping::parse(grouping)?);
            composer.compose_update_where(table, &record, &predicate)?
        }
        UpdateCondition::Sql(text) => composer.compose_update(table, &record, text)?,
    };
    Ok(sql)
}
