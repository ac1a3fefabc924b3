//! Test utilities and doubles for treasure hunt development.
//!
//! Provides a fault-injecting [`FlakyStore`], a [`RecordingRenderer`]
//! that keeps every matrix it is handed, a [`ScriptedAgent`] that replays
//! decisions and records what it saw, and small fixtures.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use rand::RngCore;
use thunt_cache::{Artifact, ArtifactKey, ArtifactStore, CacheError};
use thunt_core::{Action, Node, Observation};
use thunt_engine::{Agent, Decision, TrialView};
use thunt_model::{MatrixRenderer, MatrixView};

pub use fixtures::{game_config, small_model, small_params};

// ── FlakyStore ──────────────────────────────────────────────────

/// Wraps a store and injects failures.
///
/// Counts every call so tests can assert which path the cache took.
pub struct FlakyStore<S> {
    inner: S,
    pub fail_saves: bool,
    pub fail_loads: bool,
    pub saves: usize,
    pub loads: usize,
}

impl<S: ArtifactStore> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_saves: false,
            fail_loads: false,
            saves: 0,
            loads: 0,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

impl<S: ArtifactStore> ArtifactStore for FlakyStore<S> {
    fn save(&mut self, key: &ArtifactKey, artifact: &Artifact) -> Result<(), CacheError> {
        self.saves += 1;
        if self.fail_saves {
            return Err(CacheError::Io(io::Error::other(format!(
                "injected save failure for {key}"
            ))));
        }
        self.inner.save(key, artifact)
    }

    fn load(&mut self, key: &ArtifactKey) -> Result<Option<Artifact>, CacheError> {
        self.loads += 1;
        if self.fail_loads {
            return Err(CacheError::Io(io::Error::other(format!(
                "injected load failure for {key}"
            ))));
        }
        self.inner.load(key)
    }
}

// ── RecordingRenderer ───────────────────────────────────────────

/// One call to a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    pub destination: String,
    pub name: String,
    pub shape: (usize, usize),
    pub dense: Vec<f64>,
}

/// Keeps every rendered matrix. Clones share the same log, so a test can
/// hand one clone to a cache and inspect another.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    log: Rc<RefCell<Vec<Rendered>>>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<Rendered> {
        self.log.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.log.borrow().iter().map(|r| r.name.clone()).collect()
    }
}

impl MatrixRenderer for RecordingRenderer {
    fn render(&mut self, destination: &str, name: &str, matrix: MatrixView<'_>) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::other("injected render failure"));
        }
        self.log.borrow_mut().push(Rendered {
            destination: destination.to_string(),
            name: name.to_string(),
            shape: matrix.shape(),
            dense: matrix.to_dense_f64(),
        });
        Ok(())
    }
}

// ── ScriptedAgent ───────────────────────────────────────────────

/// What a [`ScriptedAgent`] saw on one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct Seen {
    pub round: usize,
    pub trial: usize,
    pub position: Node,
    pub observation: Option<Observation>,
    pub legal: Vec<Action>,
}

/// Replays a decision script (drilling once it runs out) and records
/// every view.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    script: Vec<Decision>,
    cursor: usize,
    pub seen: Vec<Seen>,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Decision>) -> Self {
        Self {
            script,
            cursor: 0,
            seen: Vec::new(),
        }
    }

    /// Always picks the first legal movement, or drills when none exists.
    pub fn first_move() -> Self {
        Self::new(Vec::new())
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, view: &TrialView<'_>, _rng: &mut dyn RngCore) -> Decision {
        self.seen.push(Seen {
            round: view.round,
            trial: view.trial,
            position: view.position,
            observation: view.observation,
            legal: view.legal.to_vec(),
        });
        let decision = match self.script.get(self.cursor) {
            Some(d) => d.clone(),
            None if self.script.is_empty() => Decision::new(
                view.legal
                    .iter()
                    .copied()
                    .find(|a| a.is_step())
                    .unwrap_or(Action::Drill),
            ),
            None => Decision::new(Action::Drill),
        };
        self.cursor += 1;
        decision
    }
}
