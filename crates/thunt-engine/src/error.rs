//! Simulation error type.

use std::error::Error;
use std::fmt;
use std::io;

use thunt_core::{ConfigError, TaskError, TaskParams};

/// Errors that abort a game or a multi-game run.
#[derive(Debug)]
pub enum SimError {
    /// The game configuration is invalid.
    Config(ConfigError),
    /// The task state machine refused an action or a transition.
    Task(TaskError),
    /// An agent supplied a valence vector of the wrong length.
    ValenceMismatch {
        /// Number of legal actions.
        expected: usize,
        /// Number of valences supplied.
        found: usize,
    },
    /// Valences could not be turned into choice probabilities.
    InvalidValences {
        /// Why the transform failed.
        reason: String,
    },
    /// The model was built for different task parameters.
    ModelMismatch {
        /// Parameters in the game configuration.
        expected: TaskParams,
        /// Parameters of the supplied model.
        found: TaskParams,
    },
    /// A trajectory sink failed.
    Export(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Task(e) => write!(f, "task: {e}"),
            Self::ValenceMismatch { expected, found } => write!(
                f,
                "agent supplied {found} valences for {expected} legal actions"
            ),
            Self::InvalidValences { reason } => write!(f, "invalid valences: {reason}"),
            Self::ModelMismatch { expected, found } => write!(
                f,
                "model built for d={} n_h={}, game configured for d={} n_h={}",
                found.dim(),
                found.n_hides(),
                expected.dim(),
                expected.n_hides()
            ),
            Self::Export(e) => write!(f, "trajectory export failed: {e}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Task(e) => Some(e),
            Self::Export(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TaskError> for SimError {
    fn from(e: TaskError) -> Self {
        Self::Task(e)
    }
}
