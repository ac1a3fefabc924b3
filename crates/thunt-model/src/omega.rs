//! Action-conditioned observation consistency matrices (Omega).
//!
//! `Omega[a]` is an `n_s x n_o` 0/1 support indicator: entry `(i, m)` is 1
//! iff observation `m` can physically follow reduced action `a` when the
//! task is in state `i`. Rows are not normalized.
//!
//! The rules assume the treasure lies on a hiding spot, which state
//! enumeration guarantees; a state with the treasure elsewhere would get
//! an empty row.

use log::debug;
use thunt_core::{NodeColor, Observation, ReducedAction};

use crate::error::SparseError;
use crate::sets::StateSet;
use crate::sparse::CsrMatrix;

const NONE: &[Observation] = &[];
const DRILL_PLAIN: &[Observation] = &[Observation::new(false, NodeColor::Grey)];
const DRILL_HIDE: &[Observation] = &[Observation::new(false, NodeColor::Blue)];
const STEP_PLAIN: &[Observation] = &[
    Observation::new(false, NodeColor::Black),
    Observation::new(false, NodeColor::Grey),
];
const STEP_HIDE: &[Observation] = &[
    Observation::new(false, NodeColor::Black),
    Observation::new(false, NodeColor::Blue),
];
const STEP_TREASURE: &[Observation] = &[
    Observation::new(true, NodeColor::Black),
    Observation::new(true, NodeColor::Blue),
];

/// Observations consistent with landing on a node after `action`.
///
/// `on_treasure` and `on_hide` describe the agent's node in the state
/// reached by the action. Drilling on the treasure node has no consistent
/// observation.
pub fn consistent_observations(
    action: ReducedAction,
    on_treasure: bool,
    on_hide: bool,
) -> &'static [Observation] {
    match (action, on_treasure, on_hide) {
        (ReducedAction::Drill, false, false) => DRILL_PLAIN,
        (ReducedAction::Drill, false, true) => DRILL_HIDE,
        (ReducedAction::Step, false, false) => STEP_PLAIN,
        (ReducedAction::Step, false, true) => STEP_HIDE,
        (ReducedAction::Step, true, true) => STEP_TREASURE,
        _ => NONE,
    }
}

/// Build the `n_s x n_o` consistency matrix for `action`.
pub fn build_omega(states: &StateSet, action: ReducedAction) -> Result<CsrMatrix<u8>, SparseError> {
    let mut rows = Vec::with_capacity(2 * states.len());
    let mut cols = Vec::with_capacity(2 * states.len());
    for (i, row) in states.iter().enumerate() {
        let (agent, treasure, hides) = (row[0], row[1], &row[2..]);
        for obs in consistent_observations(action, agent == treasure, hides.contains(&agent)) {
            if let Some(m) = obs.index() {
                rows.push(i);
                cols.push(m);
            }
        }
    }
    let omega = CsrMatrix::from_unit_triplets(states.len(), Observation::COUNT, &rows, &cols)?;
    debug!(
        "built omega_{action}: {}x{}, {} entries",
        states.len(),
        Observation::COUNT,
        omega.nnz()
    );
    Ok(omega)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thunt_core::TaskParams;

    fn pairs(m: &CsrMatrix<u8>, i: usize) -> Vec<(u8, u8)> {
        m.row(i)
            .indices()
            .iter()
            .map(|&c| Observation::ALL[c as usize].pair())
            .collect()
    }

    #[test]
    fn drill_rows_follow_rules() {
        let states = StateSet::enumerate(&TaskParams::new(3, 2).unwrap());
        let omega = build_omega(&states, ReducedAction::Drill).unwrap();
        for i in 0..states.len() {
            let s = states.state(i);
            let got = pairs(&omega, i);
            match (s.agent_on_treasure(), s.agent_on_hide()) {
                (false, false) => assert_eq!(got, vec![(0, 1)]),
                (false, true) => assert_eq!(got, vec![(0, 2)]),
                (true, _) => assert!(got.is_empty()),
            }
        }
    }

    #[test]
    fn step_rows_follow_rules() {
        let states = StateSet::enumerate(&TaskParams::new(3, 2).unwrap());
        let omega = build_omega(&states, ReducedAction::Step).unwrap();
        for i in 0..states.len() {
            let s = states.state(i);
            let got = pairs(&omega, i);
            match (s.agent_on_treasure(), s.agent_on_hide()) {
                (false, false) => assert_eq!(got, vec![(0, 0), (0, 1)]),
                (false, true) => assert_eq!(got, vec![(0, 0), (0, 2)]),
                (true, _) => assert_eq!(got, vec![(1, 0), (1, 2)]),
            }
        }
    }

    #[test]
    fn entries_are_binary() {
        let states = StateSet::enumerate(&TaskParams::new(2, 2).unwrap());
        for action in ReducedAction::ALL {
            let omega = build_omega(&states, action).unwrap();
            assert_eq!(omega.shape(), (states.len(), 5));
            assert!(omega.values().iter().all(|&v| v == 1));
        }
    }

    #[test]
    fn treasure_off_hide_has_no_support() {
        assert!(consistent_observations(ReducedAction::Step, true, false).is_empty());
        assert!(consistent_observations(ReducedAction::Drill, true, true).is_empty());
    }
}
