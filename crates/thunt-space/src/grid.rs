//! Square grid with 4-connected, non-wrapping movement.

use smallvec::SmallVec;
use thunt_core::{Action, ConfigError, Node, TaskParams};

/// Legal actions at one node, in canonical action order.
pub type ActionSet = SmallVec<[Action; 5]>;

/// A `dim x dim` grid whose nodes are numbered `1..=dim^2` row by row.
///
/// Movement never crosses the border: a step is legal only if the target
/// node number lies in `[1, n_nodes]` (the range check) and the step does
/// not wrap from one row's last column to the next row's first column or
/// back (the modulo check). Drilling is legal everywhere.
///
/// # Examples
///
/// ```
/// use thunt_core::Action;
/// use thunt_space::GridWorld;
///
/// let grid = GridWorld::new(3).unwrap();
/// // Node 1 is the north-west corner.
/// assert_eq!(grid.target(1, Action::East), Some(2));
/// assert_eq!(grid.target(1, Action::West), None);
/// assert_eq!(grid.target(3, Action::East), None); // would wrap to node 4
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridWorld {
    dim: usize,
    n_nodes: usize,
}

impl GridWorld {
    /// Create a grid of side `dim`.
    pub fn new(dim: usize) -> Result<Self, ConfigError> {
        if dim == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        let n_nodes = dim
            .checked_mul(dim)
            .filter(|&n| n <= Node::MAX as usize)
            .ok_or(ConfigError::GridTooLarge {
                nodes: dim.saturating_mul(dim),
            })?;
        Ok(Self { dim, n_nodes })
    }

    /// The grid described by validated task parameters.
    pub fn from_params(params: &TaskParams) -> Self {
        Self {
            dim: params.dim(),
            n_nodes: params.n_nodes(),
        }
    }

    /// Side length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.n_nodes
    }

    /// Whether `node` is a node of this grid.
    pub fn contains(&self, node: Node) -> bool {
        node >= 1 && (node as usize) <= self.n_nodes
    }

    /// Zero-based `(row, col)` of a node.
    pub fn coords(&self, node: Node) -> Option<(usize, usize)> {
        if !self.contains(node) {
            return None;
        }
        let i = node as usize - 1;
        Some((i / self.dim, i % self.dim))
    }

    /// Node at zero-based `(row, col)`.
    pub fn node_at(&self, row: usize, col: usize) -> Option<Node> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        Some((row * self.dim + col + 1) as Node)
    }

    /// Node reached by taking `action` at `node`, or `None` if the move is
    /// illegal (or `node` is not on the grid).
    pub fn target(&self, node: Node, action: Action) -> Option<Node> {
        if !self.contains(node) {
            return None;
        }
        let s1 = node as i64;
        let d = self.dim as i64;
        let next = s1 + action.value(self.dim);
        if next < 1 || next > self.n_nodes as i64 {
            return None;
        }
        // Left column: (s1 - 1) % d == 0; right column: s1 % d == 0.
        let wraps = match action {
            Action::West => (s1 - 1) % d == 0,
            Action::East => s1 % d == 0,
            _ => false,
        };
        if wraps {
            return None;
        }
        Some(next as Node)
    }

    /// Whether `action` is legal at `node`.
    pub fn is_legal(&self, node: Node, action: Action) -> bool {
        self.target(node, action).is_some()
    }

    /// All legal actions at `node`, in canonical action order.
    pub fn legal_actions(&self, node: Node) -> ActionSet {
        Action::ALL
            .into_iter()
            .filter(|&a| self.is_legal(node, a))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(actions: &[Action]) -> ActionSet {
        actions.iter().copied().collect()
    }

    #[test]
    fn corner_allows_east_and_south() {
        let g = GridWorld::new(3).unwrap();
        assert_eq!(
            g.legal_actions(1),
            set(&[Action::Drill, Action::East, Action::South])
        );
    }

    #[test]
    fn centre_allows_everything() {
        let g = GridWorld::new(3).unwrap();
        assert_eq!(g.legal_actions(5), set(&Action::ALL));
    }

    #[test]
    fn right_border_blocks_east_wraparound() {
        let g = GridWorld::new(3).unwrap();
        assert_eq!(g.target(3, Action::East), None);
        assert_eq!(g.target(6, Action::East), None);
        assert_eq!(g.target(4, Action::West), None);
        assert_eq!(g.target(9, Action::South), None);
        assert_eq!(g.target(8, Action::North), Some(5));
    }

    #[test]
    fn single_node_grid_only_drills() {
        let g = GridWorld::new(1).unwrap();
        assert_eq!(g.legal_actions(1), set(&[Action::Drill]));
    }

    #[test]
    fn off_grid_node_has_no_actions() {
        let g = GridWorld::new(2).unwrap();
        assert!(g.legal_actions(0).is_empty());
        assert!(g.legal_actions(5).is_empty());
    }

    #[test]
    fn rejects_zero_dimension() {
        assert_eq!(GridWorld::new(0), Err(ConfigError::ZeroDimension));
    }

    #[test]
    fn coords_roundtrip() {
        let g = GridWorld::new(4).unwrap();
        for node in 1..=16 {
            let (r, c) = g.coords(node).unwrap();
            assert_eq!(g.node_at(r, c), Some(node));
        }
        assert_eq!(g.node_at(4, 0), None);
    }

    proptest! {
        #[test]
        fn legality_matches_lattice_geometry(dim in 1usize..8, raw in 0usize..64) {
            let g = GridWorld::new(dim).unwrap();
            let node = (raw % (dim * dim) + 1) as Node;
            let (r, c) = g.coords(node).unwrap();
            let expected = |a: Action| match a {
                Action::Drill => Some((r, c)),
                Action::North => r.checked_sub(1).map(|r| (r, c)),
                Action::South => (r + 1 < dim).then_some((r + 1, c)),
                Action::West => c.checked_sub(1).map(|c| (r, c)),
                Action::East => (c + 1 < dim).then_some((r, c + 1)),
            };
            for a in Action::ALL {
                let want = expected(a).and_then(|(r, c)| g.node_at(r, c));
                prop_assert_eq!(g.target(node, a), want);
            }
        }
    }
}
