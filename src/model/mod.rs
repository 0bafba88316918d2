//! Public model API.
//!
//! - [`QuantileConfig`]: validated hyperparameters (builder pattern)
//! - [`QuantileRegressor`]: fit/predict lifecycle over a tensor backend
//! - [`CoefficientVector`]: the fitted coefficients, still in the backend
//!   representation

mod config;
mod linear;
mod quantile;

pub use config::{ConfigError, QuantileConfig};
pub use linear::CoefficientVector;
pub use quantile::{FitError, PredictError, QuantileRegressor};
