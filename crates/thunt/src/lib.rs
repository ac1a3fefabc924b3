//! Thunt: model generator and simulator for the grid-world treasure hunt task.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use thunt::prelude::*;
//!
//! // A 3x3 grid with two hiding spots: 648 states.
//! let params = TaskParams::new(3, 2).unwrap();
//! let mut cache = ModelCache::new(MemoryStore::new());
//! let model = cache.load_model(&params).unwrap();
//! assert_eq!(model.states().len(), 648);
//!
//! let mut config = GameConfig::new(params);
//! config.n_rounds = 2;
//! config.n_trials = 6;
//! config.seed = 42;
//! let mut sim = GameSimulator::new(&model, config, RandomAgent::new()).unwrap();
//! let trajectory = sim.play_game().unwrap();
//! assert_eq!(trajectory.len(), 12);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `thunt-core` | Parameters, actions, observations, states, errors |
//! | [`space`] | `thunt-space` | Grid geometry and border legality |
//! | [`model`] | `thunt-model` | State enumeration, Phi and Omega matrices |
//! | [`cache`] | `thunt-cache` | Artifact codec, stores and the model cache |
//! | [`engine`] | `thunt-engine` | Task state machine, agents and game simulator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and error enums (`thunt-core`).
pub use thunt_core as types;

/// Grid geometry (`thunt-space`).
///
/// [`space::GridWorld`] implements the range and modulo border checks
/// shared by the transition builder and the task.
pub use thunt_space as space;

/// State enumeration and sparse matrices (`thunt-model`).
///
/// [`model::TaskModel`] bundles the state set with the five
/// [`model::build_phi`] and two [`model::build_omega`] matrices.
pub use thunt_model as model;

/// Artifact persistence (`thunt-cache`).
///
/// [`cache::ModelCache`] loads what a store holds and rebuilds what it
/// does not, over a [`cache::DirStore`] or a [`cache::MemoryStore`].
pub use thunt_cache as cache;

/// Game simulation (`thunt-engine`).
pub use thunt_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use thunt::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use thunt_core::{
        Action, ConfigError, Node, NodeColor, Observation, ReducedAction, State, TaskError,
        TaskParams,
    };

    // Space
    pub use thunt_space::GridWorld;

    // Model
    pub use thunt_model::{CsrMatrix, MatrixRenderer, MatrixView, StateSet, TaskModel};

    // Cache
    pub use thunt_cache::{ArtifactKey, ArtifactStore, CacheError, DirStore, MemoryStore, ModelCache};

    // Engine
    pub use thunt_engine::{
        Agent, Decision, FixedPolicyAgent, FnAgent, GameConfig, GameSimulator, JsonLinesSink,
        ObservationPolicy, RandomAgent, RngCore, SimError, Trajectory, TrajectorySink, TrialRecord,
        TrialView, VecSink,
    };
}
