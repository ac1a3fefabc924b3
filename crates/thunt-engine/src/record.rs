//! Trajectory records.

use serde::Serialize;
use thunt_core::{Action, Node, NodeColor, Observation};

/// Everything recorded for one trial.
///
/// State fields are captured before the decision; `next_state` and
/// `treasure_found` after the transition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialRecord {
    /// Round number, 1-based.
    pub round: usize,
    /// Trial number within the round, 1-based.
    pub trial: usize,
    /// State index at trial start.
    pub state: usize,
    /// Agent position.
    pub s1: Node,
    /// Treasure position.
    pub s2: Node,
    /// Hiding-spot layout.
    pub s3: Vec<Node>,
    /// Node colors at trial start.
    pub node_colors: Vec<NodeColor>,
    /// Observation emitted after the previous action.
    pub observation: Option<Observation>,
    /// Valences supplied with the decision.
    pub valences: Option<Vec<f64>>,
    /// The agent decision.
    pub decision: Action,
    /// The action applied to the task.
    pub action: Action,
    /// State index after the transition.
    pub next_state: usize,
    /// Whether the agent stands on the treasure after the transition.
    pub treasure_found: bool,
}

/// The complete record of one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    /// Name of the agent that played.
    pub agent: String,
    /// Game number within the run, 1-based.
    pub game: usize,
    /// One record per trial, in play order.
    pub records: Vec<TrialRecord>,
}

impl Trajectory {
    /// Number of trials recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Trials after which the agent stood on the treasure.
    pub fn treasure_hits(&self) -> usize {
        self.records.iter().filter(|r| r.treasure_found).count()
    }
}
