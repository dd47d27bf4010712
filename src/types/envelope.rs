//! Response envelope types

use serde::{Deserialize, Serialize};

use super::result::PredictionResult;

/// Top-level status of an envelope.
///
/// `Error` only when the request as a whole failed; per-item failures
/// still produce `Success`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
    Error,
}

/// Static deployment metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabInfo {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_workflow")]
    pub workflow: String,
    #[serde(default = "default_purpose")]
    pub purpose: String,
}

impl Default for LabInfo {
    fn default() -> Self {
        Self {
            source: default_source(),
            workflow: default_workflow(),
            purpose: default_purpose(),
        }
    }
}

fn default_source() -> String {
    "Contoso Lab".to_string()
}

fn default_workflow() -> String {
    "Artifactory -> ACR -> Azure ML".to_string()
}

fn default_purpose() -> String {
    "Testing container deployment".to_string()
}

/// Standard response wrapper.
///
/// `count` always equals `predictions.len()`; build it through
/// [`ResponseFormatter`](crate::ResponseFormatter) rather than by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub predictions: Vec<PredictionResult>,
    pub count: usize,
    pub status: Status,
    pub timestamp: String,
    pub lab_info: LabInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    /// Number of items that failed individually.
    pub fn failed_items(&self) -> usize {
        self.predictions.iter().filter(|p| !p.is_success()).count()
    }
}
