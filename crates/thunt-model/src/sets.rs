//! Canonical state enumeration.
//!
//! States are stored as a flat row-major table of `n_s` rows, each
//! `[s1, s2, s3_1, .., s3_nh]`. Rows are sorted by agent position, then
//! treasure position, then hiding-spot layout. Because every agent
//! position pairs with the same sorted list of `(s2, s3)` combinations,
//! the table splits into `n_n` contiguous blocks of `n_s / n_n` rows that
//! are identical except for `s1`. The transition builder depends on this.

use std::ops::Range;

use smallvec::SmallVec;
use thunt_core::{Node, State, TaskParams};

use crate::error::TableError;

/// Lexicographic iterator over the `k`-element subsets of `1..=n`.
///
/// # Examples
///
/// ```
/// use thunt_model::Combinations;
///
/// let all: Vec<Vec<u16>> = Combinations::new(4, 2).map(|c| c.to_vec()).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![1, 2]);
/// assert_eq!(all[5], vec![3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct Combinations {
    n: Node,
    current: Option<SmallVec<[Node; 4]>>,
}

impl Combinations {
    /// Subsets of size `k` drawn from `1..=n`.
    ///
    /// Yields nothing when `k == 0` or `k > n`.
    pub fn new(n: Node, k: usize) -> Self {
        let current = (k >= 1 && k <= n as usize).then(|| (1..=k as Node).collect());
        Self { n, current }
    }
}

impl Iterator for Combinations {
    type Item = SmallVec<[Node; 4]>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.clone()?;

        // Advance: find the rightmost position that can still grow.
        let cur = self.current.as_mut()?;
        let k = cur.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            let max_here = self.n - (k - 1 - i) as Node;
            if cur[i] < max_here {
                cur[i] += 1;
                for j in i + 1..k {
                    cur[j] = cur[j - 1] + 1;
                }
                return Some(out);
            }
        }
        self.current = None;
        Some(out)
    }
}

/// The canonical table of every state for one `(d, n_h)` configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSet {
    params: TaskParams,
    table: Vec<Node>,
}

impl StateSet {
    /// Enumerate all states.
    ///
    /// Builds the raw list (layout, then treasure within the layout, then
    /// agent position) and re-sorts it into canonical block order.
    pub fn enumerate(params: &TaskParams) -> Self {
        let width = params.state_width();
        let n_nodes = params.n_nodes() as Node;
        let mut raw: Vec<Node> = Vec::with_capacity(params.n_states() * width);
        for layout in Combinations::new(n_nodes, params.n_hides()) {
            for &treasure in &layout {
                for agent in 1..=n_nodes {
                    raw.push(agent);
                    raw.push(treasure);
                    raw.extend_from_slice(&layout);
                }
            }
        }

        let mut rows: Vec<&[Node]> = raw.chunks_exact(width).collect();
        rows.sort_unstable();
        let table = rows.concat();
        debug_assert_eq!(table.len(), params.n_states() * width);

        Self {
            params: *params,
            table,
        }
    }

    /// Adopt a persisted table, checking that it is exactly the canonical
    /// state set for `params`.
    pub fn from_table(params: &TaskParams, table: Vec<Node>) -> Result<Self, TableError> {
        let width = params.state_width();
        let n_states = params.n_states();
        if table.len() != n_states * width {
            return Err(TableError::WrongShape {
                expected: (n_states, width),
                found: (table.len() / width, width),
            });
        }
        let n_nodes = params.n_nodes() as Node;
        let mut prev: Option<&[Node]> = None;
        for (i, row) in table.chunks_exact(width).enumerate() {
            let (agent, treasure, hides) = (row[0], row[1], &row[2..]);
            if agent == 0 || agent > n_nodes {
                return Err(TableError::InvalidState {
                    row: i,
                    reason: "agent position off the grid",
                });
            }
            if hides.iter().any(|&h| h == 0 || h > n_nodes) {
                return Err(TableError::InvalidState {
                    row: i,
                    reason: "hiding spot off the grid",
                });
            }
            if hides.windows(2).any(|w| w[0] >= w[1]) {
                return Err(TableError::InvalidState {
                    row: i,
                    reason: "hiding spots not strictly increasing",
                });
            }
            if !hides.contains(&treasure) {
                return Err(TableError::InvalidState {
                    row: i,
                    reason: "treasure is not on a hiding spot",
                });
            }
            if prev.is_some_and(|p| p >= row) {
                return Err(TableError::NotCanonical { row: i });
            }
            prev = Some(row);
        }
        Ok(Self {
            params: *params,
            table,
        })
    }

    /// Parameters this set was enumerated for.
    pub fn params(&self) -> &TaskParams {
        &self.params
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.params.n_states()
    }

    /// Always `false`: validated parameters have at least one state.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per row.
    pub fn width(&self) -> usize {
        self.params.state_width()
    }

    /// The flat row-major table.
    pub fn as_table(&self) -> &[Node] {
        &self.table
    }

    /// Raw components of state `i`.
    pub fn row(&self, i: usize) -> &[Node] {
        let w = self.width();
        &self.table[i * w..(i + 1) * w]
    }

    /// Agent position of state `i`.
    pub fn agent(&self, i: usize) -> Node {
        self.table[i * self.width()]
    }

    /// Treasure position of state `i`.
    pub fn treasure(&self, i: usize) -> Node {
        self.table[i * self.width() + 1]
    }

    /// Hiding-spot layout of state `i`.
    pub fn hides(&self, i: usize) -> &[Node] {
        &self.row(i)[2..]
    }

    /// Decoded state `i`.
    pub fn state(&self, i: usize) -> State {
        let row = self.row(i);
        State::new(row[0], row[1], &row[2..])
    }

    /// Contiguous index range of the states whose agent position is `s1`.
    pub fn block(&self, s1: Node) -> Range<usize> {
        let len = self.params.block_len();
        let start = (s1 as usize - 1) * len;
        start..start + len
    }

    /// Index of `state`, or `None` if it is not a valid state.
    pub fn index_of(&self, state: &State) -> Option<usize> {
        if state.agent == 0 || state.agent as usize > self.params.n_nodes() {
            return None;
        }
        let mut key: SmallVec<[Node; 8]> = SmallVec::with_capacity(self.width());
        key.push(state.agent);
        key.push(state.treasure);
        key.extend_from_slice(&state.hides);
        if key.len() != self.width() {
            return None;
        }
        let block = self.block(state.agent);
        let offset = block.start;
        let rows: Vec<&[Node]> = self.table[block.start * self.width()..block.end * self.width()]
            .chunks_exact(self.width())
            .collect();
        rows.binary_search(&key.as_slice()).ok().map(|k| offset + k)
    }

    /// Iterator over the raw rows.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, Node> {
        self.table.chunks_exact(self.width())
    }
}
