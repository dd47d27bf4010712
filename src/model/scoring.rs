//! Placeholder linear scoring math.

use ndarray::{Array1, Array2};

/// `features · weights + bias`.
///
/// `features` has length F, `weights` is F×C and `bias` has length C;
/// the result has length C. Shapes are checked when parameters are loaded.
pub fn linear_scores(
    features: &Array1<f64>,
    weights: &Array2<f64>,
    bias: &Array1<f64>,
) -> Array1<f64> {
    features.dot(weights) + bias
}

/// Index of the maximum score. Ties go to the first index attaining it.
pub fn argmax_first(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// `max(scores) / sum(|scores|)`, clamped into `[0, 1]`.
///
/// Zero when every score is zero (or there are none).
pub fn confidence(scores: &[f64]) -> f64 {
    let total: f64 = scores.iter().map(|s| s.abs()).sum();
    if total == 0.0 {
        return 0.0;
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (max / total).clamp(0.0, 1.0)
}
