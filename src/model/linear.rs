//! Fitted coefficient representation.

use crate::backend::TensorBackend;

/// Coefficient vector of a fitted linear quantile model.
///
/// Holds one backend value per feature column, with the intercept (when
/// present) stored in the *last* slot, matching the augmented ones column
/// appended during training:
///
/// ```text
/// weights[feature]        → coefficient
/// weights[n_features]     → intercept (only when fitted with an intercept)
/// ```
///
/// The vector stays in the backend representation; it is never decoded by
/// the model itself, so secret-shared coefficients remain secret through
/// fit and predict.
#[derive(Clone)]
pub struct CoefficientVector<B: TensorBackend> {
    weights: B::Vector,
    fit_intercept: bool,
}

impl<B: TensorBackend> std::fmt::Debug for CoefficientVector<B> {
    // Shapes only: the weights themselves may be secret.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoefficientVector")
            .field("n_features", &self.n_features())
            .field("fit_intercept", &self.fit_intercept)
            .finish()
    }
}

impl<B: TensorBackend> CoefficientVector<B> {
    /// Wrap a trained weight vector.
    ///
    /// # Panics
    ///
    /// Panics if an intercept is claimed but the vector is empty.
    pub fn new(weights: B::Vector, fit_intercept: bool) -> Self {
        if fit_intercept {
            assert!(
                B::vector_len(&weights) >= 1,
                "intercept requires at least one coefficient slot"
            );
        }
        Self {
            weights,
            fit_intercept,
        }
    }

    /// Number of input features (excluding the intercept slot).
    #[inline]
    pub fn n_features(&self) -> usize {
        B::vector_len(&self.weights) - usize::from(self.fit_intercept)
    }

    /// Total number of coefficient slots (features plus intercept).
    #[inline]
    pub fn n_columns(&self) -> usize {
        B::vector_len(&self.weights)
    }

    /// Whether the last slot is an intercept.
    #[inline]
    pub fn has_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// The coefficient vector, in the backend representation.
    #[inline]
    pub fn weights(&self) -> &B::Vector {
        &self.weights
    }

    /// Predict on an already-augmented feature matrix.
    pub fn predict(&self, features: &B::Matrix) -> B::Vector {
        debug_assert_eq!(B::matrix_shape(features).1, self.n_columns());
        B::matvec(features, &self.weights)
    }
}
