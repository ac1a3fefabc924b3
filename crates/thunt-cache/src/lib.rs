//! Artifact persistence for the treasure hunt task model.
//!
//! Every set and matrix of a configuration is stored as one named artifact
//! in a namespace `dim-{d}_hide-{n_h}`. [`ModelCache`] sits in front of an
//! [`ArtifactStore`] and implements get-or-compute: an artifact that is
//! present and valid is loaded, anything else (absent, truncated, failing
//! its checksum, or with the wrong shape) is rebuilt and written back.
//!
//! # Format
//!
//! ```text
//! [MAGIC "THNT"] [VERSION u8] [KIND u8] [ROWS u64] [COLS u64]
//! [PAYLOAD_LEN u64] [PAYLOAD ...] [FNV-1a(PAYLOAD) u64]
//! ```
//!
//! All integers are little-endian.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod cache;
pub mod codec;
pub mod error;
pub mod hash;
pub mod key;
pub mod store;

pub use artifact::{Artifact, ArtifactKind};
pub use cache::{CacheStats, ModelCache};
pub use error::CacheError;
pub use hash::fnv1a;
pub use key::ArtifactKey;
pub use store::{ArtifactStore, DirStore, MemoryStore};

/// Magic bytes at the start of every artifact.
pub const MAGIC: [u8; 4] = *b"THNT";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
