//! Telemetry metric name constants.
//!
//! Centralised metric names for labscore operations. Embedders install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `labscore_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint` — logical endpoint: "score", "health" or "info"
//! - `status` — outcome: "ok" or "error"

/// Total requests answered by the request handler.
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "labscore_requests_total";

/// Request duration in seconds.
///
/// Labels: `endpoint`.
pub const REQUEST_DURATION_SECONDS: &str = "labscore_request_duration_seconds";

/// Total items scored, including per-item failures.
///
/// Labels: `status` ("ok" | "error").
pub const ITEMS_TOTAL: &str = "labscore_items_total";

/// Total completed `load()` calls.
///
/// Labels: `model`.
pub const MODEL_LOADS_TOTAL: &str = "labscore_model_loads_total";
