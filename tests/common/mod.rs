//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use labscore::{ModelConfig, ModelState, ParameterSource, RequestHandler};

/// Loaded 1-feature, 2-class model: weights `[[1, -1]]`, bias `[0, 0]`.
pub fn tiny_model() -> ModelState {
    let config = ModelConfig::default()
        .features(1)
        .classes(["up", "down"])
        .parameters(ParameterSource::fixed(vec![vec![1.0, -1.0]], vec![0.0, 0.0]));
    let mut model = ModelState::new(config);
    model.load("tiny", "0.1.0").expect("tiny model should load");
    model
}

/// Loaded default-shaped model (10 features, 5 classes) with seeded weights.
pub fn seeded_model(seed: u64) -> ModelState {
    let config = ModelConfig::default().parameters(ParameterSource::seeded(seed));
    let mut model = ModelState::new(config);
    model
        .load("contoso-sample-model", "1.0.0")
        .expect("seeded model should load");
    model
}

pub fn tiny_handler() -> RequestHandler<ModelState> {
    RequestHandler::new(Arc::new(tiny_model()))
}
