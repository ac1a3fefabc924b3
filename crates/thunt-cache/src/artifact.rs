//! The three artifact kinds a configuration persists.

use std::fmt;

use thunt_model::{CsrMatrix, DenseTable, MatrixView};

use crate::error::CacheError;

/// Storage kind of an artifact, written as its one-byte tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ArtifactKind {
    /// Dense `i32` table.
    Table = 1,
    /// Sparse matrix with `f64` values.
    Transition = 2,
    /// Sparse matrix with `u8` values.
    Mask = 3,
}

impl ArtifactKind {
    /// The on-disk tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Kind for an on-disk tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Table),
            2 => Some(Self::Transition),
            3 => Some(Self::Mask),
            _ => None,
        }
    }

    /// Whether this kind is stored sparse.
    pub fn is_sparse(self) -> bool {
        self != Self::Table
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "dense table",
            Self::Transition => "sparse f64",
            Self::Mask => "sparse u8",
        })
    }
}

/// One persisted array.
#[derive(Clone, Debug, PartialEq)]
pub enum Artifact {
    /// A state, observation or action table.
    Table(DenseTable),
    /// A Phi matrix.
    Transition(CsrMatrix<f64>),
    /// An Omega matrix.
    Mask(CsrMatrix<u8>),
}

impl Artifact {
    /// Storage kind.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Table(_) => ArtifactKind::Table,
            Self::Transition(_) => ArtifactKind::Transition,
            Self::Mask(_) => ArtifactKind::Mask,
        }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.view().shape()
    }

    /// Borrowed view for rendering.
    pub fn view(&self) -> MatrixView<'_> {
        match self {
            Self::Table(t) => MatrixView::Table(t),
            Self::Transition(m) => MatrixView::Transition(m),
            Self::Mask(m) => MatrixView::Mask(m),
        }
    }

    /// Unwrap a table, checking its shape.
    pub fn into_table(self, shape: (usize, usize)) -> Result<DenseTable, CacheError> {
        check_shape(shape, self.shape())?;
        match self {
            Self::Table(t) => Ok(t),
            other => Err(unexpected(ArtifactKind::Table, &other)),
        }
    }

    /// Unwrap a transition matrix, checking its shape.
    pub fn into_transition(self, shape: (usize, usize)) -> Result<CsrMatrix<f64>, CacheError> {
        check_shape(shape, self.shape())?;
        match self {
            Self::Transition(m) => Ok(m),
            other => Err(unexpected(ArtifactKind::Transition, &other)),
        }
    }

    /// Unwrap a mask matrix, checking its shape.
    pub fn into_mask(self, shape: (usize, usize)) -> Result<CsrMatrix<u8>, CacheError> {
        check_shape(shape, self.shape())?;
        match self {
            Self::Mask(m) => Ok(m),
            other => Err(unexpected(ArtifactKind::Mask, &other)),
        }
    }
}

fn check_shape(expected: (usize, usize), found: (usize, usize)) -> Result<(), CacheError> {
    if expected != found {
        return Err(CacheError::ShapeMismatch { expected, found });
    }
    Ok(())
}

fn unexpected(expected: ArtifactKind, found: &Artifact) -> CacheError {
    CacheError::UnexpectedKind {
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for kind in [ArtifactKind::Table, ArtifactKind::Transition, ArtifactKind::Mask] {
            assert_eq!(ArtifactKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ArtifactKind::from_tag(0), None);
    }

    #[test]
    fn only_tables_are_dense() {
        assert!(!ArtifactKind::Table.is_sparse());
        assert!(ArtifactKind::Transition.is_sparse());
        assert!(ArtifactKind::Mask.is_sparse());
    }

    #[test]
    fn into_checks_kind_and_shape() {
        let a = Artifact::Table(DenseTable::observations());
        assert!(matches!(
            a.clone().into_table((4, 2)),
            Err(CacheError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            a.clone().into_mask((5, 2)),
            Err(CacheError::UnexpectedKind {
                expected: ArtifactKind::Mask,
                found: ArtifactKind::Table
            })
        ));
        assert!(a.into_table((5, 2)).is_ok());
    }
}
