//! Error types for artifact persistence.

use std::fmt;
use std::io;

use thunt_model::ModelError;

use crate::artifact::ArtifactKind;

/// Errors from encoding, decoding, storing or rebuilding an artifact.
///
/// Every variant except [`Build`](Self::Build) describes a stored artifact
/// that cannot be trusted. [`ModelCache`](crate::ModelCache) logs those and
/// rebuilds; only `Build` ever reaches its callers.
#[derive(Debug)]
pub enum CacheError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The artifact does not start with the expected `b"THNT"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the artifact.
        found: u8,
    },
    /// The artifact could not be decoded (truncated or corrupt data).
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The payload checksum does not match the stored one.
    ChecksumMismatch {
        /// Checksum written with the artifact.
        stored: u64,
        /// Checksum of the payload as read.
        computed: u64,
    },
    /// The artifact decoded to a different kind than the key requires.
    UnexpectedKind {
        /// Kind the key requires.
        expected: ArtifactKind,
        /// Kind found in the artifact.
        found: ArtifactKind,
    },
    /// The artifact has the wrong shape for its configuration.
    ShapeMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Found `(rows, cols)`.
        found: (usize, usize),
    },
    /// The artifact decoded but its contents are not a valid model part.
    Rejected {
        /// Why the contents were rejected.
        reason: String,
    },
    /// Building a missing artifact failed.
    Build(ModelError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"THNT\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed artifact: {detail}"),
            Self::ChecksumMismatch { stored, computed } => write!(
                f,
                "checksum mismatch: stored={stored:#018x}, computed={computed:#018x}"
            ),
            Self::UnexpectedKind { expected, found } => {
                write!(f, "expected a {expected} artifact, found {found}")
            }
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "artifact shape {}x{} does not match expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::Rejected { reason } => write!(f, "artifact rejected: {reason}"),
            Self::Build(e) => write!(f, "build failed: {e}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Build(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ModelError> for CacheError {
    fn from(e: ModelError) -> Self {
        Self::Build(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_error_is_chained() {
        let err = CacheError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn checksum_display_is_hex() {
        let err = CacheError::ChecksumMismatch {
            stored: 1,
            computed: 2,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: stored=0x0000000000000001, computed=0x0000000000000002"
        );
    }
}
