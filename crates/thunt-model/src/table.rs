//! Dense integer tables: the persisted form of the state, observation and
//! action sets.

use thunt_core::{Action, Node, Observation, TaskParams};

use crate::error::TableError;
use crate::sets::StateSet;

/// A dense row-major `rows x cols` table of `i32` values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseTable {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl DenseTable {
    /// Wrap row-major data, checking `data.len() == rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self, TableError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(TableError::WrongShape {
                expected: (rows, cols),
                found: (data.len() / cols.max(1), cols),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// The state table `S` (`n_s x (2 + n_h)`).
    pub fn from_states(states: &StateSet) -> Self {
        Self {
            rows: states.len(),
            cols: states.width(),
            data: states.as_table().iter().map(|&v| v as i32).collect(),
        }
    }

    /// The fixed observation table `O` (`5 x 2`).
    pub fn observations() -> Self {
        let data = Observation::ALL
            .iter()
            .flat_map(|o| {
                let (flag, color) = o.pair();
                [flag as i32, color as i32]
            })
            .collect();
        Self {
            rows: Observation::COUNT,
            cols: 2,
            data,
        }
    }

    /// The fixed action table `A` (`5 x 1`) for a grid of side `dim`.
    pub fn actions(dim: usize) -> Self {
        Self {
            rows: Action::COUNT,
            cols: 1,
            data: Action::ALL.iter().map(|a| a.value(dim) as i32).collect(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major values.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Convert back into a validated [`StateSet`].
    pub fn to_states(&self, params: &TaskParams) -> Result<StateSet, TableError> {
        let expected = (params.n_states(), params.state_width());
        if (self.rows, self.cols) != expected {
            return Err(TableError::WrongShape {
                expected,
                found: (self.rows, self.cols),
            });
        }
        let mut nodes = Vec::with_capacity(self.data.len());
        for (k, &v) in self.data.iter().enumerate() {
            let node = Node::try_from(v).map_err(|_| TableError::ValueOutOfRange {
                row: k / self.cols,
                value: v as i64,
            })?;
            nodes.push(node);
        }
        StateSet::from_table(params, nodes)
    }

    /// Check that this is the fixed observation table.
    pub fn expect_observations(&self) -> Result<(), TableError> {
        if *self != Self::observations() {
            return Err(TableError::UnexpectedContents {
                table: "observation",
            });
        }
        Ok(())
    }

    /// Check that this is the fixed action table for side `dim`.
    pub fn expect_actions(&self, dim: usize) -> Result<(), TableError> {
        if *self != Self::actions(dim) {
            return Err(TableError::UnexpectedContents { table: "action" });
        }
        Ok(())
    }
}
