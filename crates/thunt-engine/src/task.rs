//! The task state machine.

use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use thunt_core::{Action, ConfigError, NodeColor, Observation, ReducedAction, State, TaskError};
use thunt_model::TaskModel;
use thunt_space::ActionSet;

use crate::config::ObservationPolicy;

/// Mutable per-game task state over a shared [`TaskModel`].
///
/// Holds the current state index (and its decoded tuple), the revealed
/// node colors and the legal action set at the agent position.
#[derive(Clone, Debug)]
pub struct Task<'m> {
    model: &'m TaskModel,
    index: usize,
    state: State,
    node_colors: Vec<NodeColor>,
    legal: ActionSet,
}

impl<'m> Task<'m> {
    /// A task over `model`, already started with [`start_game`](Self::start_game).
    ///
    /// Fails with [`ConfigError::SingleNode`] on a 1x1 grid, where every
    /// state has the agent on the treasure.
    pub fn new<R: Rng + ?Sized>(model: &'m TaskModel, rng: &mut R) -> Result<Self, ConfigError> {
        if model.params().n_nodes() < 2 {
            return Err(ConfigError::SingleNode);
        }
        let mut task = Self {
            model,
            index: 0,
            state: model.states().state(0),
            node_colors: Vec::new(),
            legal: ActionSet::new(),
        };
        task.start_game(rng);
        Ok(task)
    }

    /// Draw a uniform start state until the agent is off the treasure and
    /// reset every node to black.
    pub fn start_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let states = self.model.states();
        let index = loop {
            let i = rng.gen_range(0..states.len());
            if states.agent(i) != states.treasure(i) {
                break i;
            }
        };
        self.set_index(index);
        self.node_colors.clear();
        self.node_colors
            .resize(self.model.params().n_nodes(), NodeColor::Black);
        debug!("game start: state {index} {:?}", self.state);
    }

    /// The shared model.
    pub fn model(&self) -> &'m TaskModel {
        self.model
    }

    /// Current state index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current decoded state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Revealed color of every node, indexed by `node - 1`.
    pub fn node_colors(&self) -> &[NodeColor] {
        &self.node_colors
    }

    /// Recompute and return the legal actions at the agent position.
    pub fn identify_legal_actions(&mut self) -> &[Action] {
        self.legal = self.model.grid().legal_actions(self.state.agent);
        &self.legal
    }

    /// Legal actions as of the last transition or recomputation.
    pub fn legal_actions(&self) -> &[Action] {
        &self.legal
    }

    /// Reveal the color of the agent's node: blue on a hiding spot, grey
    /// elsewhere.
    pub fn reveal_on_drill(&mut self) {
        let color = if self.state.agent_on_hide() {
            NodeColor::Blue
        } else {
            NodeColor::Grey
        };
        self.node_colors[self.state.agent as usize - 1] = color;
    }

    /// Sample the successor of the current state under `action` and move
    /// there. Returns the new state index.
    ///
    /// The draw is a categorical sample over the `Phi[action]` row. A row
    /// that is empty or not normalized, or a draw that does not land where
    /// the grid says the action leads, is a construction bug and fails
    /// with [`TaskError::SamplingInconsistency`].
    pub fn transition<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        rng: &mut R,
    ) -> Result<usize, TaskError> {
        let model = self.model;
        let grid = model.grid();
        let s1 = self.state.agent;
        if !grid.is_legal(s1, action) {
            return Err(TaskError::IllegalAction {
                action,
                node: s1,
                legal: grid.legal_actions(s1).to_vec(),
            });
        }

        let from = self.index;
        let inconsistent = |sampled: Option<usize>, reason: String| TaskError::SamplingInconsistency {
            state: from,
            action,
            sampled,
            reason,
        };

        let row = model.phi(action).row(from);
        if row.is_empty() {
            return Err(inconsistent(None, "empty transition row".into()));
        }
        let total = row.sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(inconsistent(None, format!("row sums to {total}")));
        }
        let dist = WeightedIndex::new(row.values())
            .map_err(|e| inconsistent(None, format!("row is not a distribution: {e}")))?;
        let sampled = row.indices()[dist.sample(rng)] as usize;

        let states = model.states();
        let target = grid.target(s1, action).unwrap_or(s1);
        let expected = states.block(target).start + (from - states.block(s1).start);
        if sampled != expected {
            return Err(inconsistent(
                Some(sampled),
                format!("expected state {expected} (agent at node {target})"),
            ));
        }

        self.set_index(sampled);
        Ok(sampled)
    }

    /// Observation emitted after `action` in the current state, or `None`
    /// when no observation is consistent with it (a drill on the treasure
    /// node).
    pub fn observe<R: Rng + ?Sized>(
        &self,
        action: ReducedAction,
        policy: ObservationPolicy,
        rng: &mut R,
    ) -> Option<Observation> {
        let support = self.model.omega(action).row(self.index);
        match policy {
            ObservationPolicy::Uniform => support
                .indices()
                .choose(rng)
                .and_then(|&m| Observation::from_index(m as usize)),
            ObservationPolicy::RevealedColor => {
                let color = self.node_colors[self.state.agent as usize - 1];
                let obs = Observation::new(self.state.agent_on_treasure(), color);
                let column = obs.index()? as u32;
                support.indices().contains(&column).then_some(obs)
            }
        }
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
        self.state = self.model.states().state(index);
        self.legal = self.model.grid().legal_actions(self.state.agent);
    }
}
