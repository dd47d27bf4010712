//! Public types for the labscore API.

mod envelope;
mod info;
mod item;
mod result;

pub use envelope::{LabInfo, ResponseEnvelope, Status};
pub use info::{HealthReport, ModelInfo};
pub use item::PredictionItem;
pub use result::{ModelIdentity, PredictionResult};
