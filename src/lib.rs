//! obliq: quantile regression over oblivious tensor backends.
//!
//! Fits a linear conditional-quantile model by fixed-schedule gradient
//! descent in environments where the numbers themselves may be secret — a
//! secure multi-party computation runtime, or any backend that forbids
//! branching on data. The pinball-loss subgradient is computed branch-free
//! (one oblivious comparison per sample per round, consumed by an
//! arithmetic blend) and the optimizer always runs its full iteration
//! budget, so the sequence of operations issued to the backend is
//! independent of every private value.
//!
//! # Key Types
//!
//! - [`QuantileRegressor`] - fit/predict model over a [`TensorBackend`]
//! - [`QuantileConfig`] - validated hyperparameters (builder)
//! - [`PlaintextBackend`] / [`FixedPointBackend`] - in-crate backends
//! - [`PinballGradient`] / [`L2Penalty`] / [`QuantileTrainer`] - the
//!   training pieces, usable on their own
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use obliq::{PlaintextBackend, QuantileConfig, QuantileRegressor, TensorBackend};
//!
//! let config = QuantileConfig::builder()
//!     .quantile(0.7)
//!     .alpha(0.1)
//!     .learning_rate(0.05)
//!     .max_iter(500)
//!     .build()
//!     .unwrap();
//!
//! let x = PlaintextBackend::matrix_from_array(
//!     array![[0.0f32], [1.0], [2.0], [3.0]].view(),
//! );
//! let y = PlaintextBackend::vector_from_array(array![1.0f32, 3.0, 5.0, 7.0].view());
//!
//! let mut model = QuantileRegressor::<PlaintextBackend>::new(config);
//! model.fit(&x, &y).unwrap();
//!
//! // Predictions stay in the backend representation; reveal only to evaluate.
//! let predictions = PlaintextBackend::reveal_vector(&model.predict(&x).unwrap());
//! assert_eq!(predictions.len(), 4);
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod backend;
pub mod metrics;
pub mod model;
pub mod preprocess;
pub mod testing;
pub mod training;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level model types
pub use model::{ConfigError, FitError, PredictError, QuantileConfig, QuantileRegressor};

// Backend contract and in-crate realizations
pub use backend::{FixedPointBackend, PlaintextBackend, TensorBackend};

// Training types
pub use training::{L2Penalty, PinballGradient, QuantileTrainer, TrainerParams, Verbosity};
