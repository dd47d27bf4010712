//! Input normalization.
//!
//! Turns an arbitrary decoded request body into an ordered list of
//! prediction items. Accepted shapes:
//!
//! - `{"data": [item, ...]}` — batch request, items taken from `data`
//! - `{...}` without `data` — a single item
//! - `[item, ...]` — batch request, taken as-is
//!
//! Elements of a batch are not inspected here; a non-mapping element fails
//! only its own entry during prediction.

use serde_json::Value;

use crate::error::{Result, ScoreError, json_type_name};
use crate::types::PredictionItem;

const EXPECTED_TOP_LEVEL: &str = "object or array";
const EXPECTED_DATA: &str = "array under \"data\"";

/// Normalize a decoded request body into prediction items.
pub fn normalize(raw: Value) -> Result<Vec<PredictionItem>> {
    match raw {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(into_items(items)),
            Some(other) => Err(ScoreError::InvalidInputShape {
                expected: EXPECTED_DATA,
                found: json_type_name(&other),
            }),
            None => Ok(vec![PredictionItem::new(Value::Object(map))]),
        },
        Value::Array(items) => Ok(into_items(items)),
        other => Err(ScoreError::InvalidInputShape {
            expected: EXPECTED_TOP_LEVEL,
            found: json_type_name(&other),
        }),
    }
}

/// Decode a raw JSON body and normalize it.
pub fn normalize_bytes(raw: &[u8]) -> Result<Vec<PredictionItem>> {
    let value: Value = serde_json::from_slice(raw)?;
    normalize(value)
}

fn into_items(items: Vec<Value>) -> Vec<PredictionItem> {
    items.into_iter().map(PredictionItem::new).collect()
}
