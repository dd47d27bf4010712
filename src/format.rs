//! Response formatting.

use chrono::{DateTime, Utc};

use crate::types::{LabInfo, PredictionResult, ResponseEnvelope, Status};

/// Timestamp layout used in envelopes (UTC, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wraps per-item results into a [`ResponseEnvelope`].
///
/// Formatting never fails. `count` is always derived from the results.
#[derive(Debug, Clone, Default)]
pub struct ResponseFormatter {
    lab: LabInfo,
}

impl ResponseFormatter {
    /// Create a formatter stamping the given lab metadata.
    pub fn new(lab: LabInfo) -> Self {
        Self { lab }
    }

    pub fn lab_info(&self) -> &LabInfo {
        &self.lab
    }

    /// Wrap results, stamped with the current time.
    pub fn format(&self, results: Vec<PredictionResult>, status: Status) -> ResponseEnvelope {
        self.format_at(results, status, Utc::now())
    }

    /// Wrap results with an explicit timestamp.
    pub fn format_at(
        &self,
        results: Vec<PredictionResult>,
        status: Status,
        at: DateTime<Utc>,
    ) -> ResponseEnvelope {
        ResponseEnvelope {
            count: results.len(),
            predictions: results,
            status,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            lab_info: self.lab.clone(),
            message: None,
        }
    }

    /// Envelope reporting a request-level failure.
    pub fn error(&self, message: impl Into<String>) -> ResponseEnvelope {
        ResponseEnvelope {
            message: Some(message.into()),
            ..self.format(Vec::new(), Status::Error)
        }
    }
}
