//! Model metadata and liveness probe payloads.

use serde::{Deserialize, Serialize};

/// Model metadata returned by the info probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub is_loaded: bool,
    /// Number of input features (None until loaded).
    pub features_count: Option<usize>,
    /// Ordered class labels (None until loaded).
    pub classes: Option<Vec<String>>,
    pub description: String,
}

/// Liveness probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub model_loaded: bool,
    pub model_name: String,
    pub model_version: String,
    /// Service build version.
    pub version: String,
}

impl HealthReport {
    /// Build a report from model metadata. Always "ok": the probe answers
    /// whether or not the model is loaded.
    pub fn from_info(info: &ModelInfo) -> Self {
        Self {
            status: "ok".to_string(),
            model_loaded: info.is_loaded,
            model_name: info.name.clone(),
            model_version: info.version.clone(),
            version: crate::version_string(),
        }
    }
}
