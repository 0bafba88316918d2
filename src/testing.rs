//! Testing utilities.
//!
//! Seeded synthetic data generators used by unit tests, integration tests
//! and benches. Everything here is deterministic given the seed.

use ndarray::{Array1, Array2};
use rand::prelude::*;

/// Default tolerance for floating point comparisons.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Generate random dense features, uniform in `[min, max]`.
pub fn random_features(
    n_samples: usize,
    n_features: usize,
    seed: u64,
    min: f32,
    max: f32,
) -> Array2<f32> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    Array2::from_shape_fn((n_samples, n_features), |_| min + rng.gen::<f32>() * width)
}

/// Generate regression targets as a linear model of the features plus
/// symmetric uniform noise in `[-noise_amplitude, noise_amplitude]`.
///
/// Returns `(targets, weights, bias)` so tests can assert coefficient
/// recovery. The noise is symmetric, so the conditional median of the
/// targets is the linear model itself.
pub fn linear_quantile_targets(
    features: &Array2<f32>,
    seed: u64,
    noise_amplitude: f32,
) -> (Array1<f32>, Array1<f32>, f32) {
    let (n_samples, n_features) = features.dim();
    let mut rng = StdRng::seed_from_u64(seed);

    let weights = Array1::from_shape_fn(n_features, |_| rng.gen::<f32>() * 2.0 - 1.0);
    let bias: f32 = rng.gen::<f32>() * 0.5 - 0.25;

    let mut targets = Array1::zeros(n_samples);
    for r in 0..n_samples {
        let mut y = bias;
        for c in 0..n_features {
            y += features[[r, c]] * weights[c];
        }
        if noise_amplitude > 0.0 {
            y += (rng.gen::<f32>() * 2.0 - 1.0) * noise_amplitude;
        }
        targets[r] = y;
    }

    (targets, weights, bias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_are_seeded_and_bounded() {
        let a = random_features(50, 3, 7, -1.0, 1.0);
        let b = random_features(50, 3, 7, -1.0, 1.0);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn noiseless_targets_are_exactly_linear() {
        let x = random_features(20, 2, 1, -1.0, 1.0);
        let (y, w, b) = linear_quantile_targets(&x, 2, 0.0);

        for r in 0..20 {
            let expected = b + x[[r, 0]] * w[0] + x[[r, 1]] * w[1];
            assert!((y[r] - expected).abs() < 1e-6);
        }
    }
}
