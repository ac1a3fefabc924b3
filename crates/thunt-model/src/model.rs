//! The assembled task model.

use thunt_core::{Action, Observation, ReducedAction, TaskParams};
use thunt_space::GridWorld;

use crate::error::ModelError;
use crate::omega::build_omega;
use crate::phi::build_phi;
use crate::sets::StateSet;
use crate::sparse::CsrMatrix;

/// State set plus the five transition and two consistency matrices for
/// one `(d, n_h)` configuration.
///
/// Immutable once assembled; games share it by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskModel {
    states: StateSet,
    grid: GridWorld,
    phi: Vec<CsrMatrix<f64>>,
    omega: Vec<CsrMatrix<u8>>,
}

impl TaskModel {
    /// Enumerate states and build every matrix from scratch.
    pub fn build(params: &TaskParams) -> Result<Self, ModelError> {
        let states = StateSet::enumerate(params);
        let phi = Action::ALL
            .iter()
            .map(|&a| build_phi(&states, a))
            .collect::<Result<Vec<_>, _>>()?;
        let omega = ReducedAction::ALL
            .iter()
            .map(|&a| build_omega(&states, a))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(states, phi, omega)
    }

    /// Assemble a model from already built parts.
    ///
    /// Every matrix must have the shape the parameters require, every Phi
    /// row must be a probability distribution and every Omega entry must
    /// be 1.
    ///
    /// `phi` is indexed by [`Action::index`], `omega` by
    /// [`ReducedAction::index`].
    pub fn from_parts(
        states: StateSet,
        phi: Vec<CsrMatrix<f64>>,
        omega: Vec<CsrMatrix<u8>>,
    ) -> Result<Self, ModelError> {
        if phi.len() != Action::COUNT {
            return Err(ModelError::MissingMatrices {
                family: "phi",
                expected: Action::COUNT,
                found: phi.len(),
            });
        }
        if omega.len() != ReducedAction::ALL.len() {
            return Err(ModelError::MissingMatrices {
                family: "omega",
                expected: ReducedAction::ALL.len(),
                found: omega.len(),
            });
        }
        let n = states.len();
        for (a, m) in Action::ALL.iter().zip(&phi) {
            let name = format!("phi_{a}");
            check_shape(&name, (n, n), m.shape())?;
            check_transition(&name, m)?;
        }
        for (a, m) in ReducedAction::ALL.iter().zip(&omega) {
            let name = format!("omega_{a}");
            check_shape(&name, (n, Observation::COUNT), m.shape())?;
            check_mask(&name, m)?;
        }
        let grid = GridWorld::from_params(states.params());
        Ok(Self {
            states,
            grid,
            phi,
            omega,
        })
    }

    /// Task parameters.
    pub fn params(&self) -> &TaskParams {
        self.states.params()
    }

    /// The canonical state set.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// The grid geometry.
    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// Transition matrix of `action`.
    pub fn phi(&self, action: Action) -> &CsrMatrix<f64> {
        &self.phi[action.index()]
    }

    /// Consistency matrix of `action`.
    pub fn omega(&self, action: ReducedAction) -> &CsrMatrix<u8> {
        &self.omega[action.index()]
    }
}

/// Largest accepted deviation of a transition row sum from 1.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Check that every row of `m` is non-empty and sums to 1.
pub fn check_transition(name: &str, m: &CsrMatrix<f64>) -> Result<(), ModelError> {
    let bad = (0..m.rows()).find(|&i| {
        let row = m.row(i);
        row.is_empty() || (row.sum() - 1.0).abs() > ROW_SUM_TOLERANCE
    });
    match bad {
        Some(row) => Err(ModelError::NotStochastic {
            name: name.to_string(),
            row,
        }),
        None => Ok(()),
    }
}

/// Check that every stored entry of `m` is 1.
pub fn check_mask(name: &str, m: &CsrMatrix<u8>) -> Result<(), ModelError> {
    match (0..m.rows()).find(|&i| m.row(i).values().iter().any(|&v| v != 1)) {
        Some(row) => Err(ModelError::NonUnitEntry {
            name: name.to_string(),
            row,
        }),
        None => Ok(()),
    }
}

fn check_shape(
    name: &str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), ModelError> {
    if expected != found {
        return Err(ModelError::ShapeMismatch {
            name: name.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}
