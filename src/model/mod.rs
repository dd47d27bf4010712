//! Model parameters, lifecycle and scoring.

mod schema;
pub mod scoring;
mod source;
mod state;

pub use schema::{DEFAULT_FEATURE_PREFIX, FeatureSchema};
pub use source::{ModelParams, ParameterSource};
pub use state::ModelState;
