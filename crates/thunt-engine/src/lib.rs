//! Game simulation for the treasure hunt task.
//!
//! A [`GameSimulator`] drives one [`Agent`] through `n_c` rounds of `n_t`
//! trials on a shared, read-only [`TaskModel`](thunt_model::TaskModel).
//! Each game gets a fresh [`Task`] (start state and node colors); the
//! agent's decision passes through the temperature-scaled
//! [`ActionSelector`] before the task applies it.
//!
//! # Trial sequence
//!
//! 1. Record the pre-decision state, node colors and last observation.
//! 2. Compute the legal action set for the agent position.
//! 3. Ask the agent for a decision (and optional valences).
//! 4. Turn the decision into an action (identity when `tau` is unset or 0).
//! 5. Reveal the node color on a drill.
//! 6. Sample the transition and emit the next observation.
//!
//! All randomness comes from one `ChaCha8Rng` seeded from
//! [`GameConfig::seed`], so a run is reproducible bit for bit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod record;
pub mod simulator;
pub mod sink;
pub mod task;

pub use agent::{Agent, Decision, FixedPolicyAgent, FnAgent, RandomAgent, TrialView};
pub use behavior::ActionSelector;
pub use config::{GameConfig, ObservationPolicy};
pub use error::SimError;
pub use record::{TrialRecord, Trajectory};
pub use simulator::GameSimulator;
pub use sink::{JsonLinesSink, TrajectorySink, VecSink};
pub use task::Task;

/// RNG trait object handed to [`Agent::decide`].
pub use rand::RngCore;
