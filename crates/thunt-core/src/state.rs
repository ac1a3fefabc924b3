//! Decoded world states.

use serde::Serialize;
use smallvec::SmallVec;

/// A grid node number in `1..=n_nodes`.
pub type Node = u16;

/// A decoded task state `(s1, s2, s3)`.
///
/// `hides` is the sorted hiding-spot layout; the treasure always lies on
/// one of them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct State {
    /// Agent position (s1).
    pub agent: Node,
    /// Treasure position (s2).
    pub treasure: Node,
    /// Sorted hiding-spot layout (s3).
    pub hides: SmallVec<[Node; 4]>,
}

impl State {
    /// Construct a state from its components.
    pub fn new(agent: Node, treasure: Node, hides: &[Node]) -> Self {
        Self {
            agent,
            treasure,
            hides: SmallVec::from_slice(hides),
        }
    }

    /// Whether `node` is one of the hiding spots.
    pub fn is_hide(&self, node: Node) -> bool {
        self.hides.contains(&node)
    }

    /// Whether the agent stands on the treasure.
    pub fn agent_on_treasure(&self) -> bool {
        self.agent == self.treasure
    }

    /// Whether the agent stands on a hiding spot.
    pub fn agent_on_hide(&self) -> bool {
        self.is_hide(self.agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hide_queries() {
        let s = State::new(2, 5, &[3, 5]);
        assert!(s.is_hide(5));
        assert!(!s.agent_on_hide());
        assert!(!s.agent_on_treasure());
        let t = State::new(5, 5, &[3, 5]);
        assert!(t.agent_on_treasure() && t.agent_on_hide());
    }
}
