//! Model configuration with builder pattern.
//!
//! [`QuantileConfig`] holds the immutable hyperparameters of a
//! [`QuantileRegressor`](crate::model::QuantileRegressor). It uses the `bon`
//! crate for builder generation with validation at build time, so an invalid
//! configuration never reaches `fit`.
//!
//! # Example
//!
//! ```
//! use obliq::model::QuantileConfig;
//!
//! // All defaults: median regression
//! let config = QuantileConfig::builder().build().unwrap();
//!
//! // Upper-quantile fit with a lighter penalty
//! let config = QuantileConfig::builder()
//!     .quantile(0.9)
//!     .alpha(0.1)
//!     .learning_rate(0.05)
//!     .max_iter(500)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::training::{TrainerParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors raised when a configuration fails eager validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Quantile level must lie strictly inside (0, 1).
    #[error("quantile must be in (0, 1), got {0}")]
    InvalidQuantile(f32),

    /// Regularization strength must be non-negative.
    #[error("alpha must be >= 0, got {0}")]
    InvalidAlpha(f32),

    /// Learning rate must be positive.
    #[error("learning_rate must be > 0, got {0}")]
    InvalidLearningRate(f32),

    /// Iteration count must be at least 1.
    #[error("max_iter must be at least 1")]
    InvalidMaxIter,
}

// =============================================================================
// QuantileConfig
// =============================================================================

/// Hyperparameters of a quantile regression fit.
///
/// Immutable once built; validation happens in `build()` so construction
/// fails fast on bad values (`fit`/`predict` are never reached).
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct QuantileConfig {
    /// Target quantile level τ in (0, 1). Default: 0.5 (median).
    #[builder(default = 0.5)]
    pub quantile: f32,

    /// L2 regularization strength. Default: 1.0.
    ///
    /// Applies to the full coefficient vector, intercept included; see
    /// [`L2Penalty`](crate::training::L2Penalty).
    #[builder(default = 1.0)]
    pub alpha: f32,

    /// Learn an intercept term by augmenting features with a ones column.
    /// Default: true.
    #[builder(default = true)]
    pub fit_intercept: bool,

    /// Gradient-descent step size. Default: 0.01.
    #[builder(default = 0.01)]
    pub learning_rate: f32,

    /// Number of descent iterations. Default: 1000.
    ///
    /// The loop always runs exactly this many rounds; there is no
    /// data-dependent early stopping.
    #[builder(default = 1000)]
    pub max_iter: u32,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: quantile_config_builder::IsComplete> QuantileConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `quantile` outside (0, 1)
    /// - `alpha < 0`
    /// - `learning_rate <= 0`
    /// - `max_iter == 0`
    pub fn build(self) -> Result<QuantileConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl QuantileConfig {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.quantile > 0.0 && self.quantile < 1.0) {
            return Err(ConfigError::InvalidQuantile(self.quantile));
        }
        if !(self.alpha >= 0.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.max_iter == 0 {
            return Err(ConfigError::InvalidMaxIter);
        }
        Ok(())
    }

    /// Convert to trainer parameters.
    pub fn to_trainer_params(&self) -> TrainerParams {
        TrainerParams {
            quantile: self.quantile,
            alpha: self.alpha,
            learning_rate: self.learning_rate,
            max_iter: self.max_iter,
            verbosity: self.verbosity,
        }
    }
}

impl Default for QuantileConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// Tests
// =============================================================================
