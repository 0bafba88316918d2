//! Quantile regression model.
//!
//! High-level fit/predict API around the
//! [`QuantileTrainer`](crate::training::QuantileTrainer) and
//! [`CoefficientVector`](super::CoefficientVector).

use crate::backend::TensorBackend;
use crate::preprocess;
use crate::training::QuantileTrainer;

use super::config::QuantileConfig;
use super::linear::CoefficientVector;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by [`QuantileRegressor::fit`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Feature rows and target length disagree.
    #[error("feature rows ({rows}) do not match target length ({targets})")]
    ShapeMismatch { rows: usize, targets: usize },

    /// The dataset has no samples.
    #[error("cannot fit on an empty dataset")]
    EmptyDataset,
}

/// Errors raised by [`QuantileRegressor::predict`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    /// `predict` was called before a successful `fit`.
    #[error("model has not been fitted; call fit before predict")]
    NotFitted,

    /// Feature width does not match the fitted coefficients.
    #[error("expected {expected} feature columns, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
}

// =============================================================================
// QuantileRegressor
// =============================================================================

/// Linear quantile regression model over an oblivious tensor backend.
///
/// Constructed unfitted from a validated [`QuantileConfig`]; a successful
/// [`fit`](Self::fit) populates the coefficient vector and enables
/// [`predict`](Self::predict). A second `fit` restarts optimization from
/// zero and overwrites the coefficients — the model does not train
/// incrementally.
///
/// Each instance exclusively owns its coefficient vector; concurrent fits
/// require independent instances.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use obliq::backend::{PlaintextBackend, TensorBackend};
/// use obliq::model::{QuantileConfig, QuantileRegressor};
///
/// let config = QuantileConfig::builder()
///     .quantile(0.5)
///     .alpha(0.0)
///     .learning_rate(0.05)
///     .max_iter(500)
///     .build()
///     .unwrap();
///
/// let x = PlaintextBackend::matrix_from_array(
///     array![[0.0f32], [1.0], [2.0], [3.0]].view(),
/// );
/// let y = PlaintextBackend::vector_from_array(array![1.0f32, 3.0, 5.0, 7.0].view());
///
/// let mut model = QuantileRegressor::<PlaintextBackend>::new(config);
/// model.fit(&x, &y).unwrap();
/// let predictions = model.predict(&x).unwrap();
/// assert_eq!(PlaintextBackend::vector_len(&predictions), 4);
/// ```
#[derive(Clone)]
pub struct QuantileRegressor<B: TensorBackend> {
    config: QuantileConfig,
    coefficients: Option<CoefficientVector<B>>,
}

impl<B: TensorBackend> std::fmt::Debug for QuantileRegressor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantileRegressor")
            .field("quantile", &self.config.quantile)
            .field("alpha", &self.config.alpha)
            .field("fit_intercept", &self.config.fit_intercept)
            .field("max_iter", &self.config.max_iter)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}

impl<B: TensorBackend> QuantileRegressor<B> {
    /// Create an unfitted model from a validated configuration.
    pub fn new(config: QuantileConfig) -> Self {
        Self {
            config,
            coefficients: None,
        }
    }

    /// The model's hyperparameters.
    pub fn config(&self) -> &QuantileConfig {
        &self.config
    }

    /// Whether a successful fit has populated the coefficients.
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// The fitted coefficients, if any.
    pub fn coefficients(&self) -> Option<&CoefficientVector<B>> {
        self.coefficients.as_ref()
    }

    /// Fit the model on `features` (`[n_samples, n_features]`) and `targets`
    /// (`[n_samples]`).
    ///
    /// Runs exactly `max_iter` gradient-descent rounds from a zero
    /// initialization and stores the resulting coefficient vector. Returns
    /// the same instance, now fitted.
    ///
    /// # Errors
    ///
    /// [`FitError::ShapeMismatch`] when row counts disagree,
    /// [`FitError::EmptyDataset`] when there are no samples.
    pub fn fit(&mut self, features: &B::Matrix, targets: &B::Vector) -> Result<&mut Self, FitError> {
        let (rows, _) = B::matrix_shape(features);
        let n_targets = B::vector_len(targets);
        if rows != n_targets {
            return Err(FitError::ShapeMismatch {
                rows,
                targets: n_targets,
            });
        }
        if rows == 0 {
            return Err(FitError::EmptyDataset);
        }

        let augmented = preprocess::prepare::<B>(features, self.config.fit_intercept);
        let trainer = QuantileTrainer::new(self.config.to_trainer_params());
        let weights = trainer.train::<B>(&augmented, targets);

        self.coefficients = Some(CoefficientVector::new(weights, self.config.fit_intercept));
        Ok(self)
    }

    /// Predict conditional quantiles for `features`
    /// (`[n_samples, n_features]`).
    ///
    /// Returns a backend tensor in the same representation as the inputs;
    /// nothing is decoded. Side-effect free: repeated calls on the same
    /// input yield identical output.
    ///
    /// # Errors
    ///
    /// [`PredictError::NotFitted`] before a successful fit,
    /// [`PredictError::ShapeMismatch`] when the feature width differs from
    /// the fitted one.
    pub fn predict(&self, features: &B::Matrix) -> Result<B::Vector, PredictError> {
        let coefficients = self.coefficients.as_ref().ok_or(PredictError::NotFitted)?;

        let (_, cols) = B::matrix_shape(features);
        if cols != coefficients.n_features() {
            return Err(PredictError::ShapeMismatch {
                expected: coefficients.n_features(),
                got: cols,
            });
        }

        let augmented = preprocess::prepare::<B>(features, coefficients.has_intercept());
        Ok(coefficients.predict(&augmented))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PlaintextBackend;
    use ndarray::array;

    fn small_config() -> QuantileConfig {
        QuantileConfig::builder()
            .quantile(0.5)
            .alpha(0.0)
            .learning_rate(0.05)
            .max_iter(400)
            .build()
            .unwrap()
    }

    fn line_data() -> (
        <PlaintextBackend as TensorBackend>::Matrix,
        <PlaintextBackend as TensorBackend>::Vector,
    ) {
        // y = 2*x + 1
        let x = PlaintextBackend::matrix_from_array(array![[0.0f32], [1.0], [2.0], [3.0]].view());
        let y = PlaintextBackend::vector_from_array(array![1.0f32, 3.0, 5.0, 7.0].view());
        (x, y)
    }

    #[test]
    fn fit_then_predict() {
        let (x, y) = line_data();
        let mut model = QuantileRegressor::<PlaintextBackend>::new(small_config());

        assert!(!model.is_fitted());
        model.fit(&x, &y).unwrap();
        assert!(model.is_fitted());

        let preds = PlaintextBackend::reveal_vector(&model.predict(&x).unwrap());
        let targets = [1.0f32, 3.0, 5.0, 7.0];
        for (pred, target) in preds.iter().zip(targets) {
            assert!((pred - target).abs() < 0.5, "pred {pred} vs target {target}");
        }
    }

    #[test]
    fn predict_before_fit_fails() {
        let (x, _) = line_data();
        let model = QuantileRegressor::<PlaintextBackend>::new(small_config());
        assert_eq!(model.predict(&x).unwrap_err(), PredictError::NotFitted);
    }

    #[test]
    fn mismatched_rows_fail() {
        let x = PlaintextBackend::matrix_from_array(array![[0.0f32], [1.0], [2.0]].view());
        let y = PlaintextBackend::vector_from_array(array![1.0f32, 2.0].view());

        let mut model = QuantileRegressor::<PlaintextBackend>::new(small_config());
        assert_eq!(
            model.fit(&x, &y).unwrap_err(),
            FitError::ShapeMismatch { rows: 3, targets: 2 }
        );
        assert!(!model.is_fitted());
    }

    #[test]
    fn empty_dataset_fails() {
        let x = PlaintextBackend::matrix_from_array(ndarray::Array2::zeros((0, 2)).view());
        let y = PlaintextBackend::vector_from_array(ndarray::Array1::zeros(0).view());

        let mut model = QuantileRegressor::<PlaintextBackend>::new(small_config());
        assert_eq!(model.fit(&x, &y).unwrap_err(), FitError::EmptyDataset);
    }

    #[test]
    fn predict_width_checked_against_fit() {
        let (x, y) = line_data();
        let mut model = QuantileRegressor::<PlaintextBackend>::new(small_config());
        model.fit(&x, &y).unwrap();

        let wide = PlaintextBackend::matrix_from_array(array![[1.0f32, 2.0]].view());
        assert_eq!(
            model.predict(&wide).unwrap_err(),
            PredictError::ShapeMismatch { expected: 1, got: 2 }
        );
    }

    #[test]
    fn refit_restarts_from_scratch() {
        let (x_a, y_a) = line_data();
        // A different relationship: y = -x
        let x_b = PlaintextBackend::matrix_from_array(array![[0.0f32], [1.0], [2.0], [3.0]].view());
        let y_b = PlaintextBackend::vector_from_array(array![0.0f32, -1.0, -2.0, -3.0].view());

        let mut refitted = QuantileRegressor::<PlaintextBackend>::new(small_config());
        refitted.fit(&x_a, &y_a).unwrap();
        refitted.fit(&x_b, &y_b).unwrap();

        let mut fresh = QuantileRegressor::<PlaintextBackend>::new(small_config());
        fresh.fit(&x_b, &y_b).unwrap();

        let w_refit = PlaintextBackend::reveal_vector(refitted.coefficients().unwrap().weights());
        let w_fresh = PlaintextBackend::reveal_vector(fresh.coefficients().unwrap().weights());
        assert_eq!(w_refit, w_fresh);
    }

    #[test]
    fn fit_without_intercept_keeps_width() {
        let config = QuantileConfig::builder()
            .quantile(0.5)
            .alpha(0.0)
            .fit_intercept(false)
            .learning_rate(0.05)
            .max_iter(200)
            .build()
            .unwrap();

        let (x, y) = line_data();
        let mut model = QuantileRegressor::<PlaintextBackend>::new(config);
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert_eq!(coef.n_columns(), 1);
        assert!(!coef.has_intercept());
    }
}
