//! JSON data parsing
//!
//! Accepts either a top-level array of objects or an object wrapping such an
//! array under one of the usual keys (`data`, `rows`, `items`, `records`,
//! `results`). Anything else yields an empty dataset.

use crate::types::{Cell, Row};
use serde_json::Value;

use super::error::DataResult;

/// Keys checked, in order, when the document is an object
const WRAPPER_KEYS: [&str; 5] = ["data", "rows", "items", "records", "results"];

/// Parse JSON content from a string
///
/// Elements that are not objects are skipped. Nested arrays and objects are
/// kept as their JSON text.
pub fn parse_json_content(json: &str) -> DataResult<Vec<Row>> {
    let value: Value = serde_json::from_str(json)?;

    let Some(array) = extract_array(value) else {
        tracing::debug!("JSON document has no row array");
        return Ok(Vec::new());
    };

    let total = array.len();
    let rows: Vec<Row> = array
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(obj.into_iter().map(|(k, v)| (k, Cell::from(v))).collect()),
            _ => None,
        })
        .collect();

    if rows.len() < total {
        tracing::debug!(skipped = total - rows.len(), "Skipped non-object JSON elements");
    }
    Ok(rows)
}

/// Extract the array from JSON value, handling common wrapper patterns
fn extract_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(arr) => Some(arr),
        Value::Object(mut obj) => WRAPPER_KEYS.iter().find_map(|key| match obj.remove(*key) {
            Some(Value::Array(arr)) => Some(arr),
            _ => None,
        }),
        _ => None,
    }
}
