//! Request orchestration: normalize → predict → format.
//!
//! Every request walks the same stages and is handled fresh; the only state
//! shared across requests is the read-only predictor.
//!
//! ```text
//! Received ──normalize──► Normalized ──predict──► Predicted ──format──► Formatted ──► Responded(success)
//!    │                        │
//!    └────────────────────────┴──────── any failure ───────────────────────────────► Responded(error)
//! ```
//!
//! Transports (HTTP, gRPC, a CLI) sit outside this module and only see
//! [`Reply`] values: a status code plus a JSON body.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::format::ResponseFormatter;
use crate::normalize::normalize;
use crate::telemetry;
use crate::traits::Predictor;
use crate::types::{ResponseEnvelope, Status};
use crate::{Result, ScoreError};

/// Pipeline stage a request has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Normalized,
    Predicted,
    Formatted,
    Responded,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Normalized => "normalized",
            Stage::Predicted => "predicted",
            Stage::Formatted => "formatted",
            Stage::Responded => "responded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-neutral reply: HTTP-equivalent status and JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    /// Serialize `value` as the body.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_vec(value)?,
        })
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body, e.g. into a [`ResponseEnvelope`].
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Orchestrates one request at a time against a shared predictor.
///
/// Hand in the predictor only after it has finished loading; the handler
/// never mutates it.
pub struct RequestHandler<P: Predictor> {
    predictor: Arc<P>,
    formatter: ResponseFormatter,
}

impl<P: Predictor> RequestHandler<P> {
    /// Create a handler with the default lab metadata.
    pub fn new(predictor: Arc<P>) -> Self {
        Self::with_formatter(predictor, ResponseFormatter::default())
    }

    pub fn with_formatter(predictor: Arc<P>, formatter: ResponseFormatter) -> Self {
        Self {
            predictor,
            formatter,
        }
    }

    pub fn predictor(&self) -> &Arc<P> {
        &self.predictor
    }

    pub fn formatter(&self) -> &ResponseFormatter {
        &self.formatter
    }

    /// Run the pipeline on an already-decoded body.
    ///
    /// Structural failures (bad shape, model not loaded) abort with an
    /// error; per-item failures stay inside a successful envelope.
    #[instrument(skip_all, fields(endpoint = "score"))]
    pub fn score(&self, raw: Value) -> Result<ResponseEnvelope> {
        let items = normalize(raw).inspect_err(|e| log_failure(Stage::Received, e))?;
        debug!(stage = %Stage::Normalized, items = items.len());

        let results = self
            .predictor
            .predict(&items)
            .inspect_err(|e| log_failure(Stage::Normalized, e))?;
        debug!(stage = %Stage::Predicted, results = results.len());

        let envelope = self.formatter.format(results, Status::Success);
        debug!(stage = %Stage::Formatted, count = envelope.count);
        Ok(envelope)
    }

    /// Score endpoint: raw JSON bytes in, [`Reply`] out.
    ///
    /// 200 with the envelope on structural success (even if some items
    /// failed), otherwise the error's status code with an error envelope.
    pub fn handle(&self, raw: &[u8]) -> Reply {
        let start = Instant::now();
        let outcome = serde_json::from_slice::<Value>(raw)
            .map_err(ScoreError::from)
            .inspect_err(|e| log_failure(Stage::Received, e))
            .and_then(|value| self.score(value));

        let reply = match outcome {
            Ok(envelope) => self.reply(200, &envelope),
            Err(e) => self.reply(e.status_code(), &self.formatter.error(e.to_string())),
        };
        debug!(stage = %Stage::Responded, status = reply.status);
        record_request("score", start, reply.is_success());
        reply
    }

    /// Liveness probe. Always answers 200.
    pub fn health(&self) -> Reply {
        let start = Instant::now();
        let reply = self.reply(200, &self.predictor.health());
        record_request("health", start, reply.is_success());
        reply
    }

    /// Model metadata probe. Always answers 200.
    pub fn info(&self) -> Reply {
        let start = Instant::now();
        let reply = self.reply(200, &self.predictor.info());
        record_request("info", start, reply.is_success());
        reply
    }

    /// Encode `value` as a reply. If encoding fails the caller still gets
    /// a 500 with an error envelope.
    pub fn reply<T: Serialize>(&self, status: u16, value: &T) -> Reply {
        Reply::json(status, value).unwrap_or_else(|e| {
            error!(error = %e, "failed to encode response");
            let envelope = self.formatter.error("failed to encode response");
            Reply {
                status: 500,
                body: serde_json::to_vec(&envelope).unwrap_or_default(),
            }
        })
    }
}

fn log_failure(stage: Stage, err: &ScoreError) {
    if err.is_client_error() {
        warn!(%stage, error = %err, "scoring failed");
    } else {
        error!(%stage, error = %err, "scoring failed");
    }
}

/// Record request outcome metrics (counter + histogram).
fn record_request(endpoint: &'static str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "endpoint" => endpoint,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "endpoint" => endpoint,
    )
    .record(elapsed);
}
