//! Border legality over whole grids.

use proptest::prelude::*;
use thunt_core::{Action, Node};
use thunt_space::GridWorld;

#[test]
fn three_by_three_legal_sets() {
    let grid = GridWorld::new(3).unwrap();
    let moves = |n: Node| -> Vec<Action> {
        grid.legal_actions(n)
            .into_iter()
            .filter(|a| a.is_step())
            .collect()
    };
    assert_eq!(moves(1), vec![Action::East, Action::South]);
    assert_eq!(moves(3), vec![Action::South, Action::West]);
    assert_eq!(moves(5), Action::ALL[1..].to_vec());
    assert_eq!(moves(7), vec![Action::North, Action::East]);
    assert_eq!(moves(9), vec![Action::North, Action::West]);
    assert_eq!(moves(4), vec![Action::North, Action::East, Action::South]);
}

#[test]
fn one_by_one_only_drills() {
    let grid = GridWorld::new(1).unwrap();
    assert_eq!(grid.legal_actions(1).as_slice(), &[Action::Drill]);
}

proptest! {
    #[test]
    fn moves_are_reversible(dim in 1usize..12, seed in any::<u16>()) {
        let grid = GridWorld::new(dim).unwrap();
        let node = (seed as usize % grid.node_count()) as Node + 1;
        let opposite = |a: Action| match a {
            Action::North => Action::South,
            Action::South => Action::North,
            Action::East => Action::West,
            Action::West => Action::East,
            Action::Drill => Action::Drill,
        };
        for a in grid.legal_actions(node) {
            let next = grid.target(node, a).unwrap();
            prop_assert!(grid.contains(next));
            prop_assert_eq!(grid.target(next, opposite(a)), Some(node));
        }
    }

    #[test]
    fn every_node_has_two_to_four_moves(dim in 2usize..12) {
        let grid = GridWorld::new(dim).unwrap();
        for node in 1..=grid.node_count() as Node {
            let moves = grid.legal_actions(node).iter().filter(|a| a.is_step()).count();
            prop_assert!((2..=4).contains(&moves));
        }
    }
}
