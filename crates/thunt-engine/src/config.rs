//! Game configuration and validation.

use thunt_core::{ConfigError, TaskParams};

/// How the task emits an observation after each action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObservationPolicy {
    /// Draw uniformly from the observations consistent with the new state.
    Uniform,
    /// Emit the observation the participant actually sees: the treasure
    /// flag and the revealed color of the agent's node. Emitted only if
    /// consistent with the new state.
    #[default]
    RevealedColor,
}

/// Immutable configuration of one or more games.
///
/// All fields are public for construction; [`validate()`](Self::validate)
/// runs when a [`GameSimulator`](crate::GameSimulator) is created.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Task parameters the model was built for.
    pub params: TaskParams,
    /// Trials per round (`n_t`). Default: 12.
    pub n_trials: usize,
    /// Rounds per game (`n_c`). Default: 1.
    pub n_rounds: usize,
    /// Decision temperature. `None` or `Some(0.0)` passes decisions
    /// through unchanged. Default: `None`.
    pub tau: Option<f64>,
    /// Seed of the game RNG. Default: 0.
    pub seed: u64,
    /// Observation emission policy. Default: [`ObservationPolicy::RevealedColor`].
    pub observation: ObservationPolicy,
}

impl GameConfig {
    /// Defaults for `params`.
    pub fn new(params: TaskParams) -> Self {
        Self {
            params,
            n_trials: 12,
            n_rounds: 1,
            tau: None,
            seed: 0,
            observation: ObservationPolicy::default(),
        }
    }

    /// Trials per game, `n_c * n_t`.
    pub fn total_trials(&self) -> usize {
        self.n_rounds * self.n_trials
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.params.n_nodes() < 2 {
            return Err(ConfigError::SingleNode);
        }
        if self.n_trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.n_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if let Some(tau) = self.tau {
            if !tau.is_finite() || tau < 0.0 {
                return Err(ConfigError::InvalidTemperature { value: tau });
            }
        }
        Ok(())
    }
}
