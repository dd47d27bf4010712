//! Core Predictor trait

use crate::{HealthReport, ModelInfo, PredictionItem, PredictionResult, Result};

/// The scoring seam consumed by the request handler.
///
/// [`ModelState`](crate::ModelState) is the production implementation;
/// alternative models or test doubles implement this trait instead.
/// Implementations must be safe to share across request threads once
/// loaded: `predict` takes `&self` and must not mutate parameters.
pub trait Predictor: Send + Sync {
    /// Score items in order, one result per item.
    ///
    /// Per-item failures belong inside the returned sequence; an `Err`
    /// aborts the whole request.
    fn predict(&self, items: &[PredictionItem]) -> Result<Vec<PredictionResult>>;

    /// Model metadata for the info probe.
    fn info(&self) -> ModelInfo;

    /// Liveness probe payload.
    fn health(&self) -> HealthReport {
        HealthReport::from_info(&self.info())
    }
}
