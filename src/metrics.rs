//! Evaluation metrics.
//!
//! These operate on *revealed* plaintext slices and are meant for test
//! harnesses and callers that are allowed to decode predictions. The
//! training loop never computes them: evaluating a metric on secret data
//! would need comparisons the oblivious core deliberately avoids.

/// Mean pinball loss at quantile level `quantile`.
///
/// `L_τ(y, q) = τ·max(y - q, 0) + (1 - τ)·max(q - y, 0)`, averaged over
/// samples. Lower is better; at τ = 0.5 this is half the mean absolute
/// error.
pub fn pinball_loss(predictions: &[f32], targets: &[f32], quantile: f32) -> f64 {
    assert_eq!(
        predictions.len(),
        targets.len(),
        "predictions and targets must have equal length"
    );
    if predictions.is_empty() {
        return 0.0;
    }

    let tau = quantile as f64;
    let total: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(&pred, &y)| {
            let residual = y as f64 - pred as f64;
            if residual >= 0.0 {
                tau * residual
            } else {
                (1.0 - tau) * -residual
            }
        })
        .sum();

    total / predictions.len() as f64
}

/// Empirical coverage: the fraction of targets at or below the prediction.
///
/// For a well-calibrated τ-quantile model this converges to τ as the sample
/// count grows.
pub fn coverage(predictions: &[f32], targets: &[f32]) -> f64 {
    assert_eq!(
        predictions.len(),
        targets.len(),
        "predictions and targets must have equal length"
    );
    if predictions.is_empty() {
        return 0.0;
    }

    let covered = predictions
        .iter()
        .zip(targets)
        .filter(|(&pred, &y)| y <= pred)
        .count();

    covered as f64 / predictions.len() as f64
}
