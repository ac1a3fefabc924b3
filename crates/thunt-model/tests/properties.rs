//! Structural properties of the assembled model.

use proptest::prelude::*;
use thunt_core::{Action, Node, Observation, ReducedAction, TaskParams};
use thunt_model::{DenseTable, TaskModel};

fn params_strategy() -> impl Strategy<Value = TaskParams> {
    (1usize..5, 1usize..4)
        .prop_filter("hides fit the grid", |&(d, h)| h <= d * d)
        .prop_map(|(d, h)| TaskParams::new(d, h).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn state_count_matches_cardinality(params in params_strategy()) {
        let model = TaskModel::build(&params).unwrap();
        prop_assert_eq!(
            model.states().len(),
            params.n_layouts() * params.n_hides() * params.n_nodes()
        );
        prop_assert_eq!(model.states().iter().count(), params.n_states());
    }

    #[test]
    fn phi_maps_blocks_onto_blocks(params in params_strategy()) {
        let model = TaskModel::build(&params).unwrap();
        let states = model.states();
        for a in Action::ALL {
            let phi = model.phi(a);
            for s1 in 1..=params.n_nodes() as Node {
                let block = states.block(s1);
                let next = model.grid().target(s1, a).unwrap_or(s1);
                let target = states.block(next);
                for (k, i) in block.enumerate() {
                    prop_assert_eq!(phi.row(i).indices(), &[(target.start + k) as u32]);
                    prop_assert_eq!(phi.row(i).values(), &[1.0]);
                }
            }
        }
    }

    #[test]
    fn omega_support_contains_revealed_observation(params in params_strategy()) {
        let model = TaskModel::build(&params).unwrap();
        let omega = model.omega(ReducedAction::Step);
        for i in 0..model.states().len() {
            let s = model.states().state(i);
            // A fresh step lands on an undrilled (black) node.
            let obs = Observation::new(s.agent_on_treasure(), thunt_core::NodeColor::Black);
            prop_assert_eq!(omega.get(i, obs.index().unwrap()), 1);
        }
    }
}

#[test]
fn persisted_tables_match_fixed_sets() {
    let params = TaskParams::new(3, 1).unwrap();
    let model = TaskModel::build(&params).unwrap();
    let s = DenseTable::from_states(model.states());
    assert_eq!((s.rows(), s.cols()), (81, 3));
    assert_eq!(s.to_states(&params).unwrap(), *model.states());
    assert_eq!(DenseTable::observations().rows(), params.n_observations());
    assert_eq!(DenseTable::actions(3).rows(), params.n_actions());
}
