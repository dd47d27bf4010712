//! Parameter sources and loaded parameters.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use super::FeatureSchema;
use crate::error::{Result, ScoreError};

/// Where `load()` takes model parameters from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ParameterSource {
    /// Uniform `[0, 1)` weights and bias, as for a demo model.
    ///
    /// With a seed, every load yields identical parameters.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },

    /// Explicit parameters: `weights` is one row per feature, one column
    /// per class; `bias` has one entry per class.
    Fixed {
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
}

impl Default for ParameterSource {
    fn default() -> Self {
        Self::Random { seed: None }
    }
}

impl ParameterSource {
    /// Seeded random parameters.
    pub fn seeded(seed: u64) -> Self {
        Self::Random { seed: Some(seed) }
    }

    /// Explicit parameters.
    pub fn fixed(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> Self {
        Self::Fixed { weights, bias }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Random { .. } => "random",
            Self::Fixed { .. } => "fixed",
        }
    }

    /// Materialise parameters for the given schema and class list.
    pub fn materialise(&self, schema: &FeatureSchema, classes: &[String]) -> Result<ModelParams> {
        let features = schema.len();
        let num_classes = classes.len();
        if features == 0 {
            return Err(ScoreError::InvalidParameters(
                "model needs at least one feature".to_string(),
            ));
        }
        if num_classes == 0 {
            return Err(ScoreError::InvalidParameters(
                "model needs at least one class".to_string(),
            ));
        }

        let (weights, bias) = match self {
            Self::Random { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_entropy(),
                };
                let weights =
                    Array2::from_shape_fn((features, num_classes), |_| rng.gen_range(0.0..1.0));
                let bias = Array1::from_shape_fn(num_classes, |_| rng.gen_range(0.0..1.0));
                (weights, bias)
            }
            Self::Fixed { weights, bias } => {
                if weights.len() != features {
                    return Err(ScoreError::InvalidParameters(format!(
                        "weights have {} rows, expected one per feature ({features})",
                        weights.len()
                    )));
                }
                if let Some((row, cols)) = weights
                    .iter()
                    .map(Vec::len)
                    .enumerate()
                    .find(|(_, cols)| *cols != num_classes)
                {
                    return Err(ScoreError::InvalidParameters(format!(
                        "weight row {row} has {cols} columns, expected one per class ({num_classes})"
                    )));
                }
                if bias.len() != num_classes {
                    return Err(ScoreError::InvalidParameters(format!(
                        "bias has {} entries, expected one per class ({num_classes})",
                        bias.len()
                    )));
                }
                let flat: Vec<f64> = weights.iter().flatten().copied().collect();
                let weights = Array2::from_shape_vec((features, num_classes), flat)
                    .map_err(|e| ScoreError::InvalidParameters(e.to_string()))?;
                (weights, Array1::from(bias.clone()))
            }
        };

        Ok(ModelParams {
            weights,
            bias,
            classes: classes.to_vec(),
        })
    }
}

/// Parameters held by a loaded model. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// F×C weight matrix.
    pub weights: Array2<f64>,
    /// Length-C bias.
    pub bias: Array1<f64>,
    /// Class labels, one per score column.
    pub classes: Vec<String>,
}

impl ModelParams {
    pub fn num_features(&self) -> usize {
        self.weights.nrows()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}
