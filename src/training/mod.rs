//! Training infrastructure for the quantile model.
//!
//! This module provides the pieces of the optimization loop:
//!
//! - [`PinballGradient`]: branch-free pinball subgradient (one oblivious
//!   comparison per sample per round)
//! - [`L2Penalty`]: L2 regularization gradient
//! - [`QuantileTrainer`], [`TrainerParams`]: the fixed-schedule descent loop
//! - [`TrainingLogger`], [`Verbosity`]: structured, leak-free logging
//!
//! Everything here is generic over [`TensorBackend`](crate::backend::TensorBackend)
//! and issues a data-independent sequence of backend operations.

mod logger;
mod penalty;
mod pinball;
mod trainer;

pub use logger::{TrainingLogger, Verbosity};
pub use penalty::L2Penalty;
pub use pinball::PinballGradient;
pub use trainer::{QuantileTrainer, TrainerParams};
