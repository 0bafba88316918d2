//! Fixed-schedule gradient-descent trainer.
//!
//! The loop always runs exactly `max_iter` rounds. There is no convergence
//! check: evaluating a stopping predicate on secret residuals would itself
//! require a comparison whose outcome steers control flow, so the iteration
//! budget is the only cost bound. Zero initialization plus the fixed
//! schedule make training reproducible for identical inputs.

use crate::backend::TensorBackend;

use super::logger::TrainingLogger;
use super::penalty::L2Penalty;
use super::pinball::PinballGradient;
use super::Verbosity;

// =============================================================================
// TrainerParams
// =============================================================================

/// Parameters for quantile training.
#[derive(Clone, Debug)]
pub struct TrainerParams {
    /// Target quantile level τ in (0, 1).
    pub quantile: f32,

    /// L2 regularization strength (applies to the full coefficient vector).
    pub alpha: f32,

    /// Gradient-descent step size.
    pub learning_rate: f32,

    /// Number of descent rounds. Always runs to completion.
    pub max_iter: u32,

    /// Verbosity level for training output.
    pub verbosity: Verbosity,
}

impl Default for TrainerParams {
    fn default() -> Self {
        Self {
            quantile: 0.5,
            alpha: 1.0,
            learning_rate: 0.01,
            max_iter: 1000,
            verbosity: Verbosity::default(),
        }
    }
}

// =============================================================================
// QuantileTrainer
// =============================================================================

/// Gradient-descent trainer for the linear quantile model.
///
/// One round issues, in order: a matrix-vector product for the predictions,
/// an elementwise subtraction for the residuals, the pinball unit's single
/// comparison and blend, a transposed product for the aggregate gradient,
/// and the scaled update. The schedule is identical every round and never
/// depends on tensor contents.
#[derive(Clone, Debug)]
pub struct QuantileTrainer {
    params: TrainerParams,
}

impl QuantileTrainer {
    /// Create a trainer with the given parameters.
    pub fn new(params: TrainerParams) -> Self {
        Self { params }
    }

    /// Trainer parameters.
    pub fn params(&self) -> &TrainerParams {
        &self.params
    }

    /// Run the fixed descent schedule and return the coefficient vector.
    ///
    /// `features` must already carry the intercept column if one is wanted;
    /// the returned vector has one entry per feature column.
    pub fn train<B: TensorBackend>(&self, features: &B::Matrix, targets: &B::Vector) -> B::Vector {
        let (n_samples, n_columns) = B::matrix_shape(features);
        debug_assert_eq!(n_samples, B::vector_len(targets));
        debug_assert!(n_samples > 0);

        let pinball = PinballGradient::new(self.params.quantile);
        let penalty = L2Penalty::new(self.params.alpha);
        let logger = TrainingLogger::new(self.params.verbosity);

        let inv_samples = 1.0 / n_samples as f32;
        let n_rounds = self.params.max_iter as usize;
        let mut weights = B::zeros(n_columns);

        logger.start_training(n_rounds, n_samples, n_columns);

        for round in 0..n_rounds {
            let predictions = B::matvec(features, &weights);
            let residuals = B::sub(targets, &predictions);
            let g = pinball.gradient::<B>(&residuals);

            // The residual-space subgradient enters the weight gradient with
            // a sign flip through r = y - Xw, so ∇L = α·w - Xᵀg/n.
            let data_grad = B::scale(&B::matvec_t(features, &g), inv_samples);
            let gradient = B::sub(&penalty.gradient::<B>(&weights), &data_grad);

            weights = B::sub(&weights, &B::scale(&gradient, self.params.learning_rate));
            logger.log_round(round, n_rounds);
        }

        logger.finish_training();
        weights
    }
}

// =============================================================================
// Tests
// =============================================================================
