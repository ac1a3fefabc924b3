//! Optional sink for freshly built matrices.
//!
//! A [`MatrixRenderer`] receives every matrix the cache builds (never one
//! it loads) together with the artifact namespace as its destination.
//! Rendering is a side channel; callers log and ignore its failures.

use std::io;

use crate::sparse::CsrMatrix;
use crate::table::DenseTable;

/// Borrowed view of one artifact for rendering.
#[derive(Clone, Copy, Debug)]
pub enum MatrixView<'a> {
    /// A dense integer table (`S`, `O` or `A`).
    Table(&'a DenseTable),
    /// A right-stochastic transition matrix.
    Transition(&'a CsrMatrix<f64>),
    /// A 0/1 consistency mask.
    Mask(&'a CsrMatrix<u8>),
}

impl MatrixView<'_> {
    /// `(rows, cols)` of the viewed matrix.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Table(t) => (t.rows(), t.cols()),
            Self::Transition(m) => m.shape(),
            Self::Mask(m) => m.shape(),
        }
    }

    /// Dense row-major `f64` copy.
    pub fn to_dense_f64(&self) -> Vec<f64> {
        match self {
            Self::Table(t) => t.data().iter().map(|&v| v as f64).collect(),
            Self::Transition(m) => m.to_dense(),
            Self::Mask(m) => m.to_dense().into_iter().map(f64::from).collect(),
        }
    }
}

/// Receives freshly built matrices.
pub trait MatrixRenderer {
    /// Render `matrix` under `name` into `destination`.
    fn render(&mut self, destination: &str, name: &str, matrix: MatrixView<'_>) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_view_densifies() {
        let m = CsrMatrix::<u8>::from_unit_triplets(2, 3, &[0, 1], &[2, 0]).unwrap();
        let v = MatrixView::Mask(&m);
        assert_eq!(v.shape(), (2, 3));
        assert_eq!(v.to_dense_f64(), vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn table_view_densifies() {
        let t = DenseTable::actions(2);
        let v = MatrixView::Table(&t);
        assert_eq!(v.shape(), (5, 1));
        assert_eq!(v.to_dense_f64(), vec![0.0, -2.0, 1.0, 2.0, -1.0]);
    }
}
