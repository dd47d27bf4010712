//! Prediction input items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ItemError, json_type_name};

/// One input record: a mapping from feature name to numeric value.
///
/// Wraps the decoded JSON as-is. Shape checks happen per item during
/// prediction, so a malformed element only fails its own entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionItem(Value);

impl PredictionItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Build an item from `(feature, value)` pairs.
    pub fn from_features<I, K>(features: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let map: Map<String, Value> = features
            .into_iter()
            .map(|(k, v)| (k.into(), Value::from(v)))
            .collect();
        Self(Value::Object(map))
    }

    /// The raw JSON value, echoed back as `input` in results.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The item as a feature mapping.
    pub fn as_mapping(&self) -> Result<&Map<String, Value>, ItemError> {
        self.0.as_object().ok_or(ItemError::NotAMapping {
            found: json_type_name(&self.0),
        })
    }

    /// Look up a feature, defaulting to `0.0` when absent.
    ///
    /// Numbers and booleans coerce; anything else is a per-item error.
    /// Numbers that do not fit an `f64` (e.g. `1e400`) are rejected here
    /// rather than at decode time.
    pub fn feature(&self, name: &str) -> Result<f64, ItemError> {
        let map = self.as_mapping()?;
        match map.get(name) {
            None => Ok(0.0),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ItemError::NumberOutOfRange {
                feature: name.to_string(),
            }),
            Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
            Some(other) => Err(ItemError::NonNumericFeature {
                feature: name.to_string(),
                found: json_type_name(other),
            }),
        }
    }
}

impl From<Value> for PredictionItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
