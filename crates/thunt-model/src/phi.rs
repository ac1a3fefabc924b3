//! Action-conditioned state transition matrices (Phi).
//!
//! Movement only changes the agent position, and the canonical state
//! table repeats the same `(s2, s3)` sequence in every agent-position
//! block. An action therefore maps a whole block onto another whole block
//! row for row: block `s1` goes to block `s1 + a` when the move is legal
//! and onto itself when it is not (an illegal move is not counted; the
//! participant simply chooses again). The matrix is assembled from `n_n`
//! block offsets instead of an `n_s x n_s` comparison.

use log::debug;
use thunt_core::{Action, Node};
use thunt_space::GridWorld;

use crate::error::SparseError;
use crate::sets::StateSet;
use crate::sparse::CsrMatrix;

/// Row and column index arrays of `Phi[action]`, one entry per state.
pub fn transition_triplets(states: &StateSet, action: Action) -> (Vec<usize>, Vec<usize>) {
    let params = states.params();
    let grid = GridWorld::from_params(params);
    let mut rows = Vec::with_capacity(params.n_states());
    let mut cols = Vec::with_capacity(params.n_states());
    for s1 in 1..=params.n_nodes() as Node {
        let next = grid.target(s1, action).unwrap_or(s1);
        rows.extend(states.block(s1));
        cols.extend(states.block(next));
    }
    (rows, cols)
}

/// Build the `n_s x n_s` transition matrix for `action`.
///
/// Every row holds exactly one entry of `1.0`.
pub fn build_phi(states: &StateSet, action: Action) -> Result<CsrMatrix<f64>, SparseError> {
    let n = states.len();
    let (rows, cols) = transition_triplets(states, action);
    let phi = CsrMatrix::from_unit_triplets(n, n, &rows, &cols)?;
    debug!("built phi_{action}: {n}x{n}, {} entries", phi.nnz());
    Ok(phi)
}
