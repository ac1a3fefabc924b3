//! Compressed sparse row matrices.
//!
//! [`CsrMatrix`] is the storage type for every transition and observation
//! matrix. It is built once from triplet arrays and never mutated; rows are
//! addressed by state index and hand out borrowed [`RowView`]s.

use std::fmt;

use crate::error::SparseError;

/// Scalar types a [`CsrMatrix`] can store.
pub trait Element: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Additive identity, the value of every implicit entry.
    const ZERO: Self;
    /// Value of a unit (support) entry.
    const ONE: Self;
    /// Numeric value as `f64`.
    fn to_f64(self) -> f64;
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    fn to_f64(self) -> f64 {
        self
    }
}

impl Element for u8 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// An immutable `rows x cols` matrix in compressed sparse row layout.
///
/// Within each row, column indices are strictly increasing. Explicitly
/// stored entries may hold any value, including zero.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix<T> {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<u32>,
    values: Vec<T>,
}

/// Borrowed view of one matrix row.
#[derive(Clone, Copy, Debug)]
pub struct RowView<'a, T> {
    indices: &'a [u32],
    values: &'a [T],
}

impl<'a, T: Element> RowView<'a, T> {
    /// Column indices of the stored entries, increasing.
    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    /// Stored values, aligned with [`indices`](Self::indices).
    pub fn values(&self) -> &'a [T] {
        self.values
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether the row stores no entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Sum of the row's values.
    pub fn sum(&self) -> f64 {
        self.values.iter().map(|v| v.to_f64()).sum()
    }

    /// `(column, value)` pairs of the stored entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + 'a {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(&c, &v)| (c as usize, v))
    }
}

impl<T: Element> CsrMatrix<T> {
    /// Build a matrix from `(row, col, value)` triplet arrays.
    ///
    /// Entries may arrive in any order. Duplicate coordinates are rejected
    /// rather than summed.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        row_idx: &[usize],
        col_idx: &[usize],
        values: &[T],
    ) -> Result<Self, SparseError> {
        if row_idx.len() != col_idx.len() || row_idx.len() != values.len() {
            return Err(SparseError::LengthMismatch {
                rows: row_idx.len(),
                cols: col_idx.len(),
                values: values.len(),
            });
        }
        if cols > u32::MAX as usize {
            return Err(SparseError::TooManyColumns { cols });
        }
        for (&r, &c) in row_idx.iter().zip(col_idx) {
            if r >= rows {
                return Err(SparseError::RowOutOfBounds { row: r, rows });
            }
            if c >= cols {
                return Err(SparseError::ColumnOutOfBounds { col: c, cols });
            }
        }

        let nnz = row_idx.len();
        let mut indptr = vec![0usize; rows + 1];
        for &r in row_idx {
            indptr[r + 1] += 1;
        }
        for i in 0..rows {
            indptr[i + 1] += indptr[i];
        }

        // Scatter entries into their row segments.
        let mut cursor = indptr[..rows].to_vec();
        let mut indices = vec![0u32; nnz];
        let mut vals = vec![T::ZERO; nnz];
        for k in 0..nnz {
            let slot = &mut cursor[row_idx[k]];
            indices[*slot] = col_idx[k] as u32;
            vals[*slot] = values[k];
            *slot += 1;
        }

        for r in 0..rows {
            let (start, end) = (indptr[r], indptr[r + 1]);
            if end - start < 2 {
                continue;
            }
            let mut segment: Vec<(u32, T)> = indices[start..end]
                .iter()
                .copied()
                .zip(vals[start..end].iter().copied())
                .collect();
            segment.sort_by_key(|&(c, _)| c);
            for pair in segment.windows(2) {
                if pair[0].0 == pair[1].0 {
                    return Err(SparseError::DuplicateEntry {
                        row: r,
                        col: pair[0].0 as usize,
                    });
                }
            }
            for (k, (c, v)) in segment.into_iter().enumerate() {
                indices[start + k] = c;
                vals[start + k] = v;
            }
        }

        Ok(Self {
            rows,
            cols,
            indptr,
            indices,
            values: vals,
        })
    }

    /// Build a matrix with a [`Element::ONE`] at every `(row, col)` pair.
    pub fn from_unit_triplets(
        rows: usize,
        cols: usize,
        row_idx: &[usize],
        col_idx: &[usize],
    ) -> Result<Self, SparseError> {
        let values = vec![T::ONE; row_idx.len()];
        Self::from_triplets(rows, cols, row_idx, col_idx, &values)
    }

    /// Reassemble a matrix from raw CSR arrays, validating the layout.
    pub fn from_raw_parts(
        rows: usize,
        cols: usize,
        indptr: Vec<usize>,
        indices: Vec<u32>,
        values: Vec<T>,
    ) -> Result<Self, SparseError> {
        let invalid = |reason: String| Err(SparseError::InvalidLayout { reason });
        if indptr.len() != rows + 1 {
            return invalid(format!("indptr has {} entries for {rows} rows", indptr.len()));
        }
        if indices.len() != values.len() {
            return invalid(format!(
                "{} indices but {} values",
                indices.len(),
                values.len()
            ));
        }
        if indptr[0] != 0 || indptr[rows] != indices.len() {
            return invalid("indptr does not span the stored entries".into());
        }
        for r in 0..rows {
            let (start, end) = (indptr[r], indptr[r + 1]);
            if start > end {
                return invalid(format!("indptr decreases at row {r}"));
            }
            let row = &indices[start..end];
            if row.iter().any(|&c| c as usize >= cols) {
                return invalid(format!("column out of bounds in row {r}"));
            }
            if row.windows(2).any(|w| w[0] >= w[1]) {
                return invalid(format!("columns not strictly increasing in row {r}"));
            }
        }
        Ok(Self {
            rows,
            cols,
            indptr,
            indices,
            values,
        })
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Row pointer array (`rows + 1` entries).
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index array.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Value array.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// View of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> RowView<'_, T> {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        RowView {
            indices: &self.indices[start..end],
            values: &self.values[start..end],
        }
    }

    /// Entry at `(i, j)`, [`Element::ZERO`] when not stored or out of range.
    pub fn get(&self, i: usize, j: usize) -> T {
        if i >= self.rows || j >= self.cols {
            return T::ZERO;
        }
        let row = self.row(i);
        match row.indices.binary_search(&(j as u32)) {
            Ok(k) => row.values[k],
            Err(_) => T::ZERO,
        }
    }

    /// Dense row-major copy of the matrix.
    pub fn to_dense(&self) -> Vec<T> {
        let mut out = vec![T::ZERO; self.rows * self.cols];
        for r in 0..self.rows {
            for (c, v) in self.row(r).iter() {
                out[r * self.cols + c] = v;
            }
        }
        out
    }
}
