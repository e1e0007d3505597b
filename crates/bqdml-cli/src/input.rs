use std::io::Read;

use anyhow::Context;
use bqdml::Record;
use serde_json::Value;

use crate::cli::Input;

/// Read and parse the JSON document at `input`.
pub fn read_json(input: &Input) -> anyhow::Result<Value> {
    match input {
        Input::Stdin => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            serde_json::from_str(&raw).context("failed to parse JSON from stdin")
        }
        Input::File(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse JSON in {}", path.display()))
        }
    }
}

/// A JSON object becomes one record, keeping key order.
pub fn record_from_json(value: &Value) -> anyhow::Result<Record> {
    let Value::Object(object) = value else {
        anyhow::bail!("expected a JSON object, got {}", json_type(value));
    };
    Ok(Record::from_json_object(object)?)
}

/// A JSON array of objects becomes a batch of records.
pub fn records_from_json(value: &Value) -> anyhow::Result<Vec<Record>> {
    let Value::Array(items) = value else {
        anyhow::bail!("expected a JSON array of objects, got {}", json_type(value));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| record_from_json(item).with_context(|| format!("record {i}")))
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
