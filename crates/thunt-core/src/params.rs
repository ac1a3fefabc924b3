//! Task parameters and set cardinalities.

use crate::action::Action;
use crate::error::ConfigError;
use crate::observation::Observation;
use crate::state::Node;

/// Immutable task parameters for one `(d, n_h)` configuration.
///
/// Constructed once through [`TaskParams::new`], which derives every set
/// cardinality and rejects inconsistent configurations before any state
/// enumeration or matrix construction can begin.
///
/// # Examples
///
/// ```
/// use thunt_core::TaskParams;
///
/// let p = TaskParams::new(2, 1).unwrap();
/// assert_eq!(p.n_nodes(), 4);
/// assert_eq!(p.n_layouts(), 4);
/// assert_eq!(p.n_states(), 16);
/// assert!(TaskParams::new(2, 5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskParams {
    dim: usize,
    n_nodes: usize,
    n_hides: usize,
    n_layouts: usize,
    n_states: usize,
}

impl TaskParams {
    /// Compute the cardinalities for a `dim x dim` grid with `n_hides`
    /// hiding spots.
    ///
    /// `n_s3 = C(n_n, n_h)` layouts and `n_s = n_s3 * n_h * n_n` states.
    pub fn new(dim: usize, n_hides: usize) -> Result<Self, ConfigError> {
        if dim == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        let n_nodes = dim
            .checked_mul(dim)
            .ok_or(ConfigError::GridTooLarge { nodes: usize::MAX })?;
        if n_nodes > Node::MAX as usize {
            return Err(ConfigError::GridTooLarge { nodes: n_nodes });
        }
        if n_hides == 0 {
            return Err(ConfigError::ZeroHidingSpots);
        }
        if n_hides > n_nodes {
            return Err(ConfigError::TooManyHidingSpots {
                hides: n_hides,
                nodes: n_nodes,
            });
        }

        let layouts = binomial(n_nodes as u128, n_hides as u128);
        let states = layouts
            .and_then(|l| l.checked_mul(n_hides as u128))
            .and_then(|l| l.checked_mul(n_nodes as u128));
        let states = match states {
            Some(s) if s <= u32::MAX as u128 => s,
            Some(s) => return Err(ConfigError::StateSpaceTooLarge { states: s }),
            None => return Err(ConfigError::StateSpaceTooLarge { states: u128::MAX }),
        };
        let n_states = states as usize;

        Ok(Self {
            dim,
            n_nodes,
            n_hides,
            n_layouts: n_states / (n_hides * n_nodes),
            n_states,
        })
    }

    /// Grid side length `d`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of grid nodes `n_n = d^2`.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of hiding spots `n_h`.
    pub fn n_hides(&self) -> usize {
        self.n_hides
    }

    /// Number of hiding-spot layouts `n_s3 = C(n_n, n_h)`.
    pub fn n_layouts(&self) -> usize {
        self.n_layouts
    }

    /// State space cardinality `n_s`.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Action space cardinality (always 5).
    pub fn n_actions(&self) -> usize {
        Action::COUNT
    }

    /// Observation space cardinality (always 5).
    pub fn n_observations(&self) -> usize {
        Observation::COUNT
    }

    /// Number of states sharing one agent position, `n_s / n_n`.
    pub fn block_len(&self) -> usize {
        self.n_layouts * self.n_hides
    }

    /// Components per state row: agent, treasure, and `n_h` hiding spots.
    pub fn state_width(&self) -> usize {
        2 + self.n_hides
    }
}

/// `C(n, k)` by the multiplicative formula, `None` on overflow.
fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is divisible by (i + 1) at every step.
        acc = acc.checked_mul(n - i)? / (i + 1);
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn three_by_three_one_hide() {
        let p = TaskParams::new(3, 1).unwrap();
        assert_eq!(p.n_nodes(), 9);
        assert_eq!(p.n_layouts(), 9);
        assert_eq!(p.n_states(), 81);
        assert_eq!(p.block_len(), 9);
        assert_eq!(p.state_width(), 3);
        assert_eq!(p.n_actions(), 5);
        assert_eq!(p.n_observations(), 5);
    }

    #[test]
    fn four_by_four_two_hides() {
        let p = TaskParams::new(4, 2).unwrap();
        assert_eq!(p.n_layouts(), 120);
        assert_eq!(p.n_states(), 120 * 2 * 16);
    }

    #[test]
    fn rejects_too_many_hides() {
        assert_eq!(
            TaskParams::new(2, 5),
            Err(ConfigError::TooManyHidingSpots { hides: 5, nodes: 4 })
        );
    }

    #[test]
    fn rejects_zero_dimension_and_zero_hides() {
        assert_eq!(TaskParams::new(0, 1), Err(ConfigError::ZeroDimension));
        assert_eq!(TaskParams::new(3, 0), Err(ConfigError::ZeroHidingSpots));
    }

    #[test]
    fn rejects_state_space_overflow() {
        assert!(matches!(
            TaskParams::new(10, 50),
            Err(ConfigError::StateSpaceTooLarge { .. })
        ));
    }

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(9, 0), Some(1));
        assert_eq!(binomial(9, 9), Some(1));
        assert_eq!(binomial(16, 2), Some(120));
        assert_eq!(binomial(25, 3), Some(2300));
        assert_eq!(binomial(3, 4), Some(0));
    }

    proptest! {
        #[test]
        fn cardinalities_are_consistent(dim in 1usize..6, hides in 1usize..4) {
            let n_nodes = dim * dim;
            prop_assume!(hides <= n_nodes);
            let p = TaskParams::new(dim, hides).unwrap();
            prop_assert_eq!(p.n_layouts() * p.n_hides() * p.n_nodes(), p.n_states());
            prop_assert_eq!(p.block_len() * p.n_nodes(), p.n_states());
        }
    }
}
