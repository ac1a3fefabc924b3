//! Error types shared across the treasure hunt workspace.
//!
//! [`ConfigError`] covers every way a task or game configuration can be
//! rejected before any set or matrix is built. [`TaskError`] covers the
//! programmer errors the task state machine refuses to absorb.

use std::error::Error;
use std::fmt;

use crate::action::Action;
use crate::state::Node;

/// Invalid task or game configuration.
///
/// Always raised before any state enumeration, matrix construction or
/// game simulation begins.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The grid side length is zero.
    ZeroDimension,
    /// The grid has a single node, so the agent would always start on the
    /// treasure.
    SingleNode,
    /// No hiding spots were requested.
    ZeroHidingSpots,
    /// More hiding spots than grid nodes.
    TooManyHidingSpots {
        /// Requested hiding spot count.
        hides: usize,
        /// Number of grid nodes.
        nodes: usize,
    },
    /// The grid has more nodes than a [`Node`] can number.
    GridTooLarge {
        /// Number of grid nodes requested.
        nodes: usize,
    },
    /// The state space does not fit the `u32` state index.
    StateSpaceTooLarge {
        /// The state count that overflowed (saturated at `u128::MAX`).
        states: u128,
    },
    /// A round must contain at least one trial.
    ZeroTrials,
    /// A game must contain at least one round.
    ZeroRounds,
    /// The decision temperature is negative or not finite.
    InvalidTemperature {
        /// The rejected temperature.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "grid dimension must be at least 1"),
            Self::SingleNode => {
                write!(f, "a 1x1 grid cannot start a game (agent always on treasure)")
            }
            Self::ZeroHidingSpots => write!(f, "at least one hiding spot is required"),
            Self::TooManyHidingSpots { hides, nodes } => {
                write!(f, "{hides} hiding spots exceed the {nodes} grid nodes")
            }
            Self::GridTooLarge { nodes } => {
                write!(f, "{nodes} grid nodes exceed the node numbering range")
            }
            Self::StateSpaceTooLarge { states } => {
                write!(f, "state space of {states} states exceeds u32::MAX")
            }
            Self::ZeroTrials => write!(f, "trials per round must be at least 1"),
            Self::ZeroRounds => write!(f, "rounds per game must be at least 1"),
            Self::InvalidTemperature { value } => {
                write!(f, "decision temperature must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Hard failures of the task state machine.
///
/// Both variants indicate a bug upstream (an agent proposing an action
/// outside the legal set, or a malformed transition matrix); the current
/// game is aborted rather than continued with a corrupted trajectory.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskError {
    /// An action outside the currently legal set reached the transition.
    IllegalAction {
        /// The rejected action.
        action: Action,
        /// Agent position when the action was attempted.
        node: Node,
        /// The legal actions at that position.
        legal: Vec<Action>,
    },
    /// A transition draw disagreed with the expected single-nonzero row.
    SamplingInconsistency {
        /// State index the draw started from.
        state: usize,
        /// The action whose transition row was sampled.
        action: Action,
        /// The sampled successor index, if a draw was possible at all.
        sampled: Option<usize>,
        /// What was inconsistent.
        reason: String,
    },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalAction {
                action,
                node,
                legal,
            } => {
                write!(f, "action {action} is illegal at node {node} (legal: ")?;
                for (i, a) in legal.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
            Self::SamplingInconsistency {
                state,
                action,
                sampled,
                reason,
            } => {
                write!(f, "inconsistent {action} transition from state {state}")?;
                if let Some(j) = sampled {
                    write!(f, " to state {j}")?;
                }
                write!(f, ": {reason}")
            }
        }
    }
}

impl Error for TaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_action_lists_legal_set() {
        let err = TaskError::IllegalAction {
            action: Action::West,
            node: 1,
            legal: vec![Action::Drill, Action::East, Action::South],
        };
        assert_eq!(
            err.to_string(),
            "action west is illegal at node 1 (legal: drill, east, south)"
        );
    }

    #[test]
    fn sampling_inconsistency_mentions_sampled_state() {
        let err = TaskError::SamplingInconsistency {
            state: 3,
            action: Action::North,
            sampled: Some(3),
            reason: "self-loop on a legal move".into(),
        };
        assert!(err.to_string().contains("to state 3"));
    }
}
