//! labscore - minimal model-serving request pipeline
//!
//! Accepts prediction requests, normalizes their shape, scores each item
//! with a loaded model and returns a uniformly structured envelope. Also
//! answers liveness and metadata probes. Transports (HTTP, gRPC, CLI) are
//! thin adapters over [`RequestHandler`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use labscore::{ModelConfig, ModelState, ParameterSource, RequestHandler};
//!
//! fn main() -> labscore::Result<()> {
//!     let config = ModelConfig::default()
//!         .features(1)
//!         .classes(["up", "down"])
//!         .parameters(ParameterSource::fixed(vec![vec![1.0, -1.0]], vec![0.0, 0.0]));
//!
//!     // Load before sharing: the handler only ever reads the model.
//!     let mut model = ModelState::new(config);
//!     model.load("demo", "1.0.0")?;
//!     let handler = RequestHandler::new(Arc::new(model));
//!
//!     let reply = handler.handle(br#"{"data": [{"feature_0": 1.0}]}"#);
//!     assert_eq!(reply.status, 200);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod handler;
pub mod model;
pub mod normalize;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use config::{Config, ModelConfig};
pub use error::{ItemError, Result, ScoreError};
pub use format::ResponseFormatter;
pub use handler::{Reply, RequestHandler, Stage};
pub use model::{FeatureSchema, ModelParams, ModelState, ParameterSource};
pub use normalize::{normalize, normalize_bytes};
pub use traits::Predictor;
pub use version::{BuildInfo, PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    HealthReport, LabInfo, ModelIdentity, ModelInfo, PredictionItem, PredictionResult,
    ResponseEnvelope, Status,
};
