//! Model lifecycle: unloaded → loaded → serving.

use ndarray::Array1;
use tracing::{debug, info, instrument, warn};

use super::scoring::{argmax_first, confidence, linear_scores};
use super::{FeatureSchema, ModelParams, ParameterSource};
use crate::config::ModelConfig;
use crate::error::{ItemError, Result, ScoreError};
use crate::telemetry;
use crate::traits::Predictor;
use crate::types::{ModelIdentity, ModelInfo, PredictionItem, PredictionResult};

/// A scoring model and its lifecycle flag.
///
/// Constructed unloaded. [`load`](Self::load) takes `&mut self`, so the
/// model can only be shared (e.g. behind an `Arc`) once loading has
/// finished; [`predict`](Self::predict) only reads and needs no locking.
#[derive(Debug, Clone)]
pub struct ModelState {
    identity: ModelIdentity,
    schema: FeatureSchema,
    classes: Vec<String>,
    source: ParameterSource,
    description: String,
    params: Option<ModelParams>,
}

impl ModelState {
    /// Create an unloaded model.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            identity: ModelIdentity::new(config.name.clone(), config.version.clone()),
            schema: config.schema(),
            classes: config.classes,
            source: config.parameters,
            description: config.description,
            params: None,
        }
    }

    /// Populate parameters and mark the model loaded.
    ///
    /// Calling again replaces the parameters (fresh values for an unseeded
    /// random source); feature and class counts stay the same.
    #[instrument(skip(self), fields(source = self.source.kind()))]
    pub fn load(&mut self, name: &str, version: &str) -> Result<()> {
        info!("loading model");
        let params = self
            .source
            .materialise(&self.schema, &self.classes)
            .inspect_err(|e| warn!(error = %e, "failed to load model"))?;

        self.identity = ModelIdentity::new(name, version);
        self.params = Some(params);

        metrics::counter!(telemetry::MODEL_LOADS_TOTAL, "model" => name.to_owned()).increment(1);
        info!(
            features = self.schema.len(),
            classes = self.classes.len(),
            "model loaded"
        );
        Ok(())
    }

    /// Reload with the current identity.
    pub fn reload(&mut self) -> Result<()> {
        let ModelIdentity { name, version } = self.identity.clone();
        self.load(&name, &version)
    }

    pub fn is_loaded(&self) -> bool {
        self.params.is_some()
    }

    pub fn identity(&self) -> &ModelIdentity {
        &self.identity
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Class labels in score order. Known before loading.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Loaded parameters, if any.
    pub fn params(&self) -> Option<&ModelParams> {
        self.params.as_ref()
    }

    /// Score each item, preserving order.
    ///
    /// Returns [`ScoreError::ModelNotLoaded`] if called before `load`.
    /// Per-item failures become error entries; the batch never fails
    /// because of a single item.
    #[instrument(skip_all, fields(model = %self.identity.name, items = items.len()))]
    pub fn predict(&self, items: &[PredictionItem]) -> Result<Vec<PredictionResult>> {
        let params = self.params.as_ref().ok_or(ScoreError::ModelNotLoaded)?;

        let results: Vec<PredictionResult> = items
            .iter()
            .enumerate()
            .map(|(index, item)| match self.score_item(params, item) {
                Ok(result) => {
                    metrics::counter!(telemetry::ITEMS_TOTAL, "status" => "ok").increment(1);
                    result
                }
                Err(e) => {
                    warn!(index, error = %e, "prediction failed for item");
                    metrics::counter!(telemetry::ITEMS_TOTAL, "status" => "error").increment(1);
                    PredictionResult::failure(item.as_value().clone(), &e, self.identity.clone())
                }
            })
            .collect();

        debug!(failed = results.iter().filter(|r| !r.is_success()).count(), "batch scored");
        Ok(results)
    }

    fn score_item(
        &self,
        params: &ModelParams,
        item: &PredictionItem,
    ) -> std::result::Result<PredictionResult, ItemError> {
        item.as_mapping()?;

        let features = self
            .schema
            .names()
            .iter()
            .map(|name| item.feature(name))
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        let scores = linear_scores(&Array1::from(features), &params.weights, &params.bias).to_vec();
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ItemError::NonFiniteScore);
        }

        // Loaded params always carry at least one class.
        let idx = argmax_first(&scores).unwrap_or_default();

        Ok(PredictionResult::Success {
            input: item.as_value().clone(),
            predicted_class: params.classes[idx].clone(),
            confidence: confidence(&scores),
            scores,
            model: self.identity.clone(),
        })
    }

    /// Model metadata. Feature count and classes are `None` until loaded.
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.identity.name.clone(),
            version: self.identity.version.clone(),
            is_loaded: self.is_loaded(),
            features_count: self.params.as_ref().map(ModelParams::num_features),
            classes: self.params.as_ref().map(|p| p.classes.clone()),
            description: self.description.clone(),
        }
    }
}

impl Default for ModelState {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl Predictor for ModelState {
    fn predict(&self, items: &[PredictionItem]) -> Result<Vec<PredictionResult>> {
        ModelState::predict(self, items)
    }

    fn info(&self) -> ModelInfo {
        ModelState::info(self)
    }
}
