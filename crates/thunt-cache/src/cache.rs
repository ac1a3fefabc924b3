//! Get-or-compute front end over an [`ArtifactStore`].
//!
//! Each artifact is looked up independently. A stored artifact is used
//! only if it decodes, has the kind and shape its configuration requires,
//! and passes content validation; otherwise it is rebuilt, saved, handed
//! to the renderer (if any) and returned. A failed save is logged and the
//! freshly built value is still returned.

use log::{debug, info, warn};
use thunt_core::{Action, ReducedAction, TaskParams};
use thunt_model::{
    build_omega, build_phi, check_mask, check_transition, CsrMatrix, DenseTable, MatrixRenderer,
    StateSet, TaskModel,
};

use crate::artifact::Artifact;
use crate::error::CacheError;
use crate::key::ArtifactKey;
use crate::store::ArtifactStore;

/// Counters of cache outcomes, one increment per artifact lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Artifacts loaded and accepted.
    pub hits: u64,
    /// Artifacts not present in the store.
    pub misses: u64,
    /// Artifacts present but unreadable or invalid.
    pub corrupt: u64,
    /// Artifacts computed from scratch.
    pub builds: u64,
    /// Saves that failed after a build.
    pub save_failures: u64,
}

/// Content-addressed model cache.
///
/// # Example
///
/// ```
/// use thunt_cache::{MemoryStore, ModelCache};
/// use thunt_core::TaskParams;
///
/// let params = TaskParams::new(2, 1).unwrap();
/// let mut cache = ModelCache::new(MemoryStore::new());
/// let first = cache.load_model(&params).unwrap();
/// let builds = cache.stats().builds;
/// let second = cache.load_model(&params).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(cache.stats().builds, builds);
/// ```
pub struct ModelCache<S> {
    store: S,
    renderer: Option<Box<dyn MatrixRenderer>>,
    stats: CacheStats,
}

impl<S: ArtifactStore> ModelCache<S> {
    /// A cache over `store` with no renderer attached.
    pub fn new(store: S) -> Self {
        Self {
            store,
            renderer: None,
            stats: CacheStats::default(),
        }
    }

    /// Attach a renderer that receives every freshly built artifact.
    pub fn with_renderer(mut self, renderer: Box<dyn MatrixRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Outcome counters so far.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the cache, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the artifact under `key` through `accept`, or build it.
    ///
    /// `accept` turns a stored artifact into the value, rejecting anything
    /// that does not fit the configuration. A freshly built artifact goes
    /// through the same `accept` before it is saved or rendered; one that
    /// fails is returned as an error and never reaches the store.
    pub fn get_or_compute<T>(
        &mut self,
        key: &ArtifactKey,
        accept: impl Fn(Artifact) -> Result<T, CacheError>,
        compute: impl FnOnce() -> Result<Artifact, CacheError>,
    ) -> Result<T, CacheError> {
        match self.store.load(key) {
            Ok(Some(artifact)) => match accept(artifact) {
                Ok(value) => {
                    self.stats.hits += 1;
                    debug!("cache hit: {key}");
                    return Ok(value);
                }
                Err(e) => {
                    self.stats.corrupt += 1;
                    warn!("discarding invalid cache entry {key}: {e}");
                }
            },
            Ok(None) => {
                self.stats.misses += 1;
                debug!("cache miss: {key}");
            }
            Err(e) => {
                self.stats.corrupt += 1;
                warn!("discarding unreadable cache entry {key}: {e}");
            }
        }

        let artifact = compute()?;
        self.stats.builds += 1;
        let (rows, cols) = artifact.shape();
        info!("built {key} ({rows}x{cols})");

        let value = accept(artifact.clone())?;

        if let Err(e) = self.store.save(key, &artifact) {
            self.stats.save_failures += 1;
            warn!("failed to save {key}: {e}");
        }
        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(e) = renderer.render(&key.namespace(), key.name(), artifact.view()) {
                warn!("failed to render {key}: {e}");
            }
        }
        Ok(value)
    }

    /// The state set, backed by artifact `S`.
    pub fn state_set(&mut self, params: &TaskParams) -> Result<StateSet, CacheError> {
        let shape = (params.n_states(), params.state_width());
        self.get_or_compute(
            &ArtifactKey::states(params),
            |a| {
                a.into_table(shape)?
                    .to_states(params)
                    .map_err(|e| CacheError::Rejected {
                        reason: e.to_string(),
                    })
            },
            || {
                let states = StateSet::enumerate(params);
                Ok(Artifact::Table(DenseTable::from_states(&states)))
            },
        )
    }

    /// The fixed observation table, backed by artifact `O`.
    pub fn observation_table(&mut self, params: &TaskParams) -> Result<DenseTable, CacheError> {
        let fixed = DenseTable::observations();
        let shape = (fixed.rows(), fixed.cols());
        self.get_or_compute(
            &ArtifactKey::observations(params),
            |a| {
                let t = a.into_table(shape)?;
                t.expect_observations().map_err(|e| CacheError::Rejected {
                    reason: e.to_string(),
                })?;
                Ok(t)
            },
            || Ok(Artifact::Table(DenseTable::observations())),
        )
    }

    /// The fixed action table, backed by artifact `A`.
    pub fn action_table(&mut self, params: &TaskParams) -> Result<DenseTable, CacheError> {
        let dim = params.dim();
        let shape = (Action::COUNT, 1);
        self.get_or_compute(
            &ArtifactKey::actions(params),
            |a| {
                let t = a.into_table(shape)?;
                t.expect_actions(dim).map_err(|e| CacheError::Rejected {
                    reason: e.to_string(),
                })?;
                Ok(t)
            },
            || Ok(Artifact::Table(DenseTable::actions(dim))),
        )
    }

    /// `Phi[action]`, backed by artifact `phi_{direction}`.
    pub fn phi(&mut self, states: &StateSet, action: Action) -> Result<CsrMatrix<f64>, CacheError> {
        let n = states.len();
        self.get_or_compute(
            &ArtifactKey::phi(states.params(), action),
            |a| {
                let m = a.into_transition((n, n))?;
                check_transition(&format!("phi_{action}"), &m).map_err(rejected)?;
                Ok(m)
            },
            || Ok(Artifact::Transition(build_phi(states, action).map_err(model_err)?)),
        )
    }

    /// `Omega[action]`, backed by artifact `omega_{drill|step}`.
    pub fn omega(
        &mut self,
        states: &StateSet,
        action: ReducedAction,
    ) -> Result<CsrMatrix<u8>, CacheError> {
        let shape = (states.len(), states.params().n_observations());
        self.get_or_compute(
            &ArtifactKey::omega(states.params(), action),
            |a| {
                let m = a.into_mask(shape)?;
                check_mask(&format!("omega_{action}"), &m).map_err(rejected)?;
                Ok(m)
            },
            || Ok(Artifact::Mask(build_omega(states, action).map_err(model_err)?)),
        )
    }

    /// Every artifact of one configuration, assembled into a model.
    pub fn load_model(&mut self, params: &TaskParams) -> Result<TaskModel, CacheError> {
        let states = self.state_set(params)?;
        self.observation_table(params)?;
        self.action_table(params)?;
        let phi = Action::ALL
            .iter()
            .map(|&a| self.phi(&states, a))
            .collect::<Result<Vec<_>, _>>()?;
        let omega = ReducedAction::ALL
            .iter()
            .map(|&a| self.omega(&states, a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TaskModel::from_parts(states, phi, omega)?)
    }
}

fn rejected(e: thunt_model::ModelError) -> CacheError {
    CacheError::Rejected {
        reason: e.to_string(),
    }
}

fn model_err(e: thunt_model::SparseError) -> CacheError {
    CacheError::Build(e.into())
}
