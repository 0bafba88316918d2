//! Structured training logging.

use serde::{Deserialize, Serialize};

/// How much progress output training emits.
///
/// Only public facts are ever logged (round counters, tensor dimensions),
/// never values derived from data, so logging cannot leak anything a secure
/// backend is protecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Start/finish summary lines.
    Info,
    /// Per-round progress.
    Debug,
}

/// Progress logger used by the trainer.
#[derive(Debug, Clone)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    /// Create a logger with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        if self.verbosity >= Verbosity::Info {
            println!("[obliq] {msg}");
        }
    }

    /// Announce the start of a training run.
    pub fn start_training(&self, n_rounds: usize, n_samples: usize, n_columns: usize) {
        self.info(&format!(
            "training for {n_rounds} rounds on {n_samples} samples x {n_columns} columns"
        ));
    }

    /// Log one completed round.
    pub fn log_round(&self, round: usize, n_rounds: usize) {
        if self.verbosity >= Verbosity::Debug {
            println!("[obliq] round {}/{n_rounds}", round + 1);
        }
    }

    /// Announce the end of a training run.
    pub fn finish_training(&self) {
        self.info("training complete");
    }
}
