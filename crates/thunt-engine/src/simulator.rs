//! Round and trial orchestration.

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thunt_core::{Action, TaskError};
use thunt_model::TaskModel;
use thunt_space::ActionSet;

use crate::agent::{Agent, TrialView};
use crate::behavior::ActionSelector;
use crate::config::GameConfig;
use crate::error::SimError;
use crate::record::{TrialRecord, Trajectory};
use crate::sink::TrajectorySink;
use crate::task::Task;

/// Plays games between one agent and a shared task model.
///
/// The simulator owns the agent and the RNG. Each game creates a fresh
/// [`Task`] and drops it when the game ends.
///
/// # Example
///
/// ```
/// use thunt_core::TaskParams;
/// use thunt_engine::{GameConfig, GameSimulator, RandomAgent};
/// use thunt_model::TaskModel;
///
/// let params = TaskParams::new(2, 1).unwrap();
/// let model = TaskModel::build(&params).unwrap();
/// let mut config = GameConfig::new(params);
/// config.n_trials = 4;
/// let mut sim = GameSimulator::new(&model, config, RandomAgent::new()).unwrap();
/// let trajectory = sim.play_game().unwrap();
/// assert_eq!(trajectory.len(), 4);
/// ```
pub struct GameSimulator<'m, A> {
    model: &'m TaskModel,
    config: GameConfig,
    agent: A,
    selector: ActionSelector,
    rng: ChaCha8Rng,
    games_played: usize,
}

impl<'m, A: Agent> GameSimulator<'m, A> {
    /// Validate `config` against `model` and set up the RNG.
    pub fn new(model: &'m TaskModel, config: GameConfig, agent: A) -> Result<Self, SimError> {
        config.validate()?;
        if config.params != *model.params() {
            return Err(SimError::ModelMismatch {
                expected: config.params,
                found: *model.params(),
            });
        }
        Ok(Self {
            model,
            selector: ActionSelector::new(config.tau),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            agent,
            games_played: 0,
        })
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Mutable access to the agent.
    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    /// Consume the simulator, returning the agent.
    pub fn into_agent(self) -> A {
        self.agent
    }

    /// Games completed so far.
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    /// Play one game of `n_c` rounds of `n_t` trials.
    ///
    /// The start state is drawn once per game and carries across rounds.
    /// Any task or decision error aborts the game; no partial trajectory
    /// is returned.
    pub fn play_game(&mut self) -> Result<Trajectory, SimError> {
        let game = self.games_played + 1;
        self.agent.reset();
        let mut task = Task::new(self.model, &mut self.rng)?;
        debug!(
            "game {game}: agent {} starts in state {}",
            self.agent.name(),
            task.index()
        );

        let mut records = Vec::with_capacity(self.config.total_trials());
        let mut observation = None;
        for round in 1..=self.config.n_rounds {
            debug!("game {game}: round {round}");
            for trial in 1..=self.config.n_trials {
                let state = task.state().clone();
                let index = task.index();
                let node_colors = task.node_colors().to_vec();
                let legal: ActionSet = task.identify_legal_actions().into();

                let view = TrialView {
                    round,
                    trial,
                    position: state.agent,
                    node_colors: &node_colors,
                    observation,
                    legal: &legal,
                };
                let decision = self.agent.decide(&view, &mut self.rng);
                if !legal.contains(&decision.action) {
                    return Err(TaskError::IllegalAction {
                        action: decision.action,
                        node: state.agent,
                        legal: legal.to_vec(),
                    }
                    .into());
                }
                let action = self
                    .selector
                    .select(&decision, &legal, &mut self.rng)?;

                if action == Action::Drill {
                    task.reveal_on_drill();
                }
                let next_state = task.transition(action, &mut self.rng)?;
                let treasure_found = task.state().agent_on_treasure();
                trace!(
                    "game {game} round {round} trial {trial}: s1={} decision={} action={} -> state {next_state}",
                    state.agent,
                    decision.action,
                    action
                );

                records.push(TrialRecord {
                    round,
                    trial,
                    state: index,
                    s1: state.agent,
                    s2: state.treasure,
                    s3: state.hides.to_vec(),
                    node_colors,
                    observation,
                    valences: decision.valences,
                    decision: decision.action,
                    action,
                    next_state,
                    treasure_found,
                });
                observation = task.observe(action.reduced(), self.config.observation, &mut self.rng);
            }
        }

        self.games_played = game;
        Ok(Trajectory {
            agent: self.agent.name().to_string(),
            game,
            records,
        })
    }

    /// Play `n` games, handing each finished trajectory to `sink`.
    ///
    /// Stops at the first failing game; its trajectory never reaches the
    /// sink. Returns the number of games delivered.
    pub fn run_games(
        &mut self,
        n: usize,
        sink: &mut dyn TrajectorySink,
    ) -> Result<usize, SimError> {
        for _ in 0..n {
            let trajectory = self.play_game()?;
            sink.accept(&trajectory).map_err(SimError::Export)?;
        }
        Ok(n)
    }
}
