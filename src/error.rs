//! labscore error types

/// Request-level and lifecycle errors.
///
/// Anything in here aborts the whole request. Failures confined to a single
/// input item are [`ItemError`]s and never surface through this type.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    // Input errors
    #[error("invalid input data format: expected {expected}, got {found}")]
    InvalidInputShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Lifecycle errors
    /// `predict` was dispatched before `load` completed.
    #[error("model not loaded, call load() first")]
    ModelNotLoaded,

    #[error("invalid model parameters: {0}")]
    InvalidParameters(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ScoreError {
    /// HTTP-equivalent status code reported by the request handler.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInputShape { .. } | Self::Json(_) => 400,
            Self::ModelNotLoaded => 503,
            Self::InvalidParameters(_) | Self::Configuration(_) => 500,
        }
    }

    /// Whether the caller sent something we could not interpret.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Failure scoring a single item.
///
/// Recovered inside `predict` and recorded as an error entry in the result
/// sequence; the rest of the batch keeps going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemError {
    #[error("item is not a mapping of feature names to values (got {found})")]
    NotAMapping { found: &'static str },

    #[error("feature '{feature}' is not numeric (got {found})")]
    NonNumericFeature {
        feature: String,
        found: &'static str,
    },

    #[error("feature '{feature}' is out of range for a 64-bit float")]
    NumberOutOfRange { feature: String },

    #[error("scores are not finite")]
    NonFiniteScore,
}

/// Result type alias for labscore operations
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Short JSON type name used in error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
