//! Per-item prediction results.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ItemError;

/// Identity of the model that produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    #[serde(rename = "model_name")]
    pub name: String,
    #[serde(rename = "model_version")]
    pub version: String,
}

impl ModelIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Outcome for a single input item.
///
/// Serialized untagged: both variants share `input`, `model_name` and
/// `model_version`; a success carries the scores, a failure an `error`
/// message. Consumers tell them apart by the presence of `error`.
///
/// Decoding goes through a [`Value`] and keys on `error` instead of serde's
/// untagged buffering, which cannot read floats under `arbitrary_precision`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResult {
    Success {
        input: Value,
        predicted_class: String,
        confidence: f64,
        scores: Vec<f64>,
        #[serde(flatten)]
        model: ModelIdentity,
    },
    Failure {
        input: Value,
        error: String,
        #[serde(flatten)]
        model: ModelIdentity,
    },
}

impl PredictionResult {
    /// Record a per-item failure.
    pub fn failure(input: Value, error: &ItemError, model: ModelIdentity) -> Self {
        Self::Failure {
            input,
            error: error.to_string(),
            model,
        }
    }

    /// The input this result corresponds to.
    pub fn input(&self) -> &Value {
        match self {
            Self::Success { input, .. } | Self::Failure { input, .. } => input,
        }
    }

    pub fn model(&self) -> &ModelIdentity {
        match self {
            Self::Success { model, .. } | Self::Failure { model, .. } => model,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Predicted class label, if this item was scored.
    pub fn predicted_class(&self) -> Option<&str> {
        match self {
            Self::Success {
                predicted_class, ..
            } => Some(predicted_class),
            Self::Failure { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Success { confidence, .. } => Some(*confidence),
            Self::Failure { .. } => None,
        }
    }

    pub fn scores(&self) -> Option<&[f64]> {
        match self {
            Self::Success { scores, .. } => Some(scores),
            Self::Failure { .. } => None,
        }
    }

    /// Error message, if this item failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

#[derive(Deserialize)]
struct SuccessFields {
    input: Value,
    predicted_class: String,
    confidence: f64,
    scores: Vec<f64>,
    model_name: String,
    model_version: String,
}

#[derive(Deserialize)]
struct FailureFields {
    input: Value,
    error: String,
    model_name: String,
    model_version: String,
}

impl<'de> Deserialize<'de> for PredictionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let result = if value.get("error").is_some() {
            serde_json::from_value::<FailureFields>(value).map(|f| Self::Failure {
                input: f.input,
                error: f.error,
                model: ModelIdentity::new(f.model_name, f.model_version),
            })
        } else {
            serde_json::from_value::<SuccessFields>(value).map(|s| Self::Success {
                input: s.input,
                predicted_class: s.predicted_class,
                confidence: s.confidence,
                scores: s.scores,
                model: ModelIdentity::new(s.model_name, s.model_version),
            })
        };
        result.map_err(D::Error::custom)
    }
}
