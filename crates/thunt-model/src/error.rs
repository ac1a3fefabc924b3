//! Error types for matrix and state-table construction.

use std::error::Error;
use std::fmt;

/// Errors from building or validating a [`CsrMatrix`](crate::CsrMatrix).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SparseError {
    /// Triplet arrays have different lengths.
    LengthMismatch {
        /// Length of the row index array.
        rows: usize,
        /// Length of the column index array.
        cols: usize,
        /// Length of the value array.
        values: usize,
    },
    /// A row index is outside the matrix.
    RowOutOfBounds {
        /// The offending row.
        row: usize,
        /// Number of rows.
        rows: usize,
    },
    /// A column index is outside the matrix.
    ColumnOutOfBounds {
        /// The offending column.
        col: usize,
        /// Number of columns.
        cols: usize,
    },
    /// The same `(row, col)` entry appeared twice.
    DuplicateEntry {
        /// Row of the duplicate.
        row: usize,
        /// Column of the duplicate.
        col: usize,
    },
    /// Column count does not fit the `u32` column index.
    TooManyColumns {
        /// The requested column count.
        cols: usize,
    },
    /// Raw CSR parts are internally inconsistent.
    InvalidLayout {
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for SparseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { rows, cols, values } => write!(
                f,
                "triplet length mismatch: {rows} rows, {cols} cols, {values} values"
            ),
            Self::RowOutOfBounds { row, rows } => {
                write!(f, "row {row} out of bounds for {rows} rows")
            }
            Self::ColumnOutOfBounds { col, cols } => {
                write!(f, "column {col} out of bounds for {cols} columns")
            }
            Self::DuplicateEntry { row, col } => write!(f, "duplicate entry at ({row}, {col})"),
            Self::TooManyColumns { cols } => write!(f, "{cols} columns exceed u32::MAX"),
            Self::InvalidLayout { reason } => write!(f, "invalid CSR layout: {reason}"),
        }
    }
}

impl Error for SparseError {}

/// Errors from validating a dense state table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The table has the wrong number of entries or columns.
    WrongShape {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Found `(rows, cols)`.
        found: (usize, usize),
    },
    /// A value does not fit the table's element type or range.
    ValueOutOfRange {
        /// Row of the offending value.
        row: usize,
        /// The value.
        value: i64,
    },
    /// A row is not a valid state.
    InvalidState {
        /// Offending row.
        row: usize,
        /// Why the row is invalid.
        reason: &'static str,
    },
    /// Rows are not in strictly increasing canonical order.
    NotCanonical {
        /// First row out of order.
        row: usize,
    },
    /// A fixed table differs from its constant definition.
    UnexpectedContents {
        /// Which table.
        table: &'static str,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongShape { expected, found } => write!(
                f,
                "table shape {}x{} does not match expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::ValueOutOfRange { row, value } => {
                write!(f, "value {value} in row {row} out of range")
            }
            Self::InvalidState { row, reason } => write!(f, "row {row} is not a state: {reason}"),
            Self::NotCanonical { row } => write!(f, "row {row} breaks canonical ordering"),
            Self::UnexpectedContents { table } => {
                write!(f, "{table} table differs from its fixed definition")
            }
        }
    }
}

impl Error for TableError {}

/// Errors from assembling a [`TaskModel`](crate::TaskModel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// Matrix construction failed.
    Sparse(SparseError),
    /// State table validation failed.
    Table(TableError),
    /// A matrix does not have the shape the parameters require.
    ShapeMismatch {
        /// Artifact name (e.g. `phi_north`).
        name: String,
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Found `(rows, cols)`.
        found: (usize, usize),
    },
    /// A transition row is empty or does not sum to 1.
    NotStochastic {
        /// Artifact name.
        name: String,
        /// First offending row.
        row: usize,
    },
    /// A consistency mask stores a value other than 1.
    NonUnitEntry {
        /// Artifact name.
        name: String,
        /// First offending row.
        row: usize,
    },
    /// The wrong number of matrices was supplied.
    MissingMatrices {
        /// Which matrix family.
        family: &'static str,
        /// Expected count.
        expected: usize,
        /// Supplied count.
        found: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sparse(e) => write!(f, "sparse: {e}"),
            Self::Table(e) => write!(f, "state table: {e}"),
            Self::ShapeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "{name} has shape {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::NotStochastic { name, row } => {
                write!(f, "row {row} of {name} is not a probability distribution")
            }
            Self::NonUnitEntry { name, row } => write!(f, "{name} holds a non-unit entry in row {row}"),
            Self::MissingMatrices {
                family,
                expected,
                found,
            } => write!(f, "expected {expected} {family} matrices, got {found}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sparse(e) => Some(e),
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SparseError> for ModelError {
    fn from(e: SparseError) -> Self {
        Self::Sparse(e)
    }
}

impl From<TableError> for ModelError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}
