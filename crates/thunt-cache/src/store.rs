//! Persistence backends.
//!
//! An [`ArtifactStore`] only moves encoded artifacts in and out of storage.
//! Deciding what a failed load means is left to [`ModelCache`](crate::ModelCache).

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::artifact::Artifact;
use crate::codec;
use crate::error::CacheError;
use crate::key::ArtifactKey;

/// Keyed storage for artifacts.
pub trait ArtifactStore {
    /// Persist `artifact` under `key`, replacing any previous value.
    fn save(&mut self, key: &ArtifactKey, artifact: &Artifact) -> Result<(), CacheError>;

    /// Load the artifact under `key`.
    ///
    /// `Ok(None)` means nothing is stored. Any `Err` means something is
    /// stored but cannot be trusted.
    fn load(&mut self, key: &ArtifactKey) -> Result<Option<Artifact>, CacheError>;
}

// ── Directory store ─────────────────────────────────────────────

/// Stores each artifact as `{root}/{namespace}/{name}.bin`.
///
/// Writes go to a hidden temporary sibling that is renamed over the
/// destination once fully flushed, so a reader never observes a half
/// written file under the final name.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// A store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final path of the artifact under `key`.
    pub fn path_for(&self, key: &ArtifactKey) -> PathBuf {
        self.root.join(key.namespace()).join(key.file_name())
    }
}

impl ArtifactStore for DirStore {
    fn save(&mut self, key: &ArtifactKey, artifact: &Artifact) -> Result<(), CacheError> {
        let dir = self.root.join(key.namespace());
        fs::create_dir_all(&dir)?;
        let path = dir.join(key.file_name());
        let tmp = dir.join(format!(".{}.tmp", key.file_name()));

        let result = (|| -> Result<(), CacheError> {
            let file = File::create(&tmp)?;
            let mut w = BufWriter::new(file);
            codec::encode(&mut w, artifact)?;
            w.flush()?;
            w.get_ref().sync_all()?;
            fs::rename(&tmp, &path)?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn load(&mut self, key: &ArtifactKey) -> Result<Option<Artifact>, CacheError> {
        let file = match File::open(self.path_for(key)) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut r = BufReader::new(file);
        codec::decode(&mut r).map(Some)
    }
}

// ── In-memory store ─────────────────────────────────────────────

/// Keeps encoded artifacts in memory, in insertion order.
///
/// Artifacts go through the same codec as on disk, so a load returns a
/// freshly decoded copy.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: IndexMap<ArtifactKey, Vec<u8>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &ArtifactKey> {
        self.entries.keys()
    }

    /// Encoded bytes under `key`.
    pub fn raw(&self, key: &ArtifactKey) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Mutable encoded bytes under `key`, for corrupting entries in tests.
    pub fn raw_mut(&mut self, key: &ArtifactKey) -> Option<&mut Vec<u8>> {
        self.entries.get_mut(key)
    }

    /// Store raw bytes under `key` without encoding.
    pub fn insert_raw(&mut self, key: ArtifactKey, bytes: Vec<u8>) {
        self.entries.insert(key, bytes);
    }

    /// Drop the entry under `key`.
    pub fn remove(&mut self, key: &ArtifactKey) -> Option<Vec<u8>> {
        self.entries.shift_remove(key)
    }
}

impl ArtifactStore for MemoryStore {
    fn save(&mut self, key: &ArtifactKey, artifact: &Artifact) -> Result<(), CacheError> {
        self.entries
            .insert(key.clone(), codec::encode_to_vec(artifact));
        Ok(())
    }

    fn load(&mut self, key: &ArtifactKey) -> Result<Option<Artifact>, CacheError> {
        self.entries
            .get(key)
            .map(|bytes| codec::decode_from_slice(bytes))
            .transpose()
    }
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for &mut S {
    fn save(&mut self, key: &ArtifactKey, artifact: &Artifact) -> Result<(), CacheError> {
        (**self).save(key, artifact)
    }

    fn load(&mut self, key: &ArtifactKey) -> Result<Option<Artifact>, CacheError> {
        (**self).load(key)
    }
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for Box<S> {
    fn save(&mut self, key: &ArtifactKey, artifact: &Artifact) -> Result<(), CacheError> {
        (**self).save(key, artifact)
    }

    fn load(&mut self, key: &ArtifactKey) -> Result<Option<Artifact>, CacheError> {
        (**self).load(key)
    }
}
