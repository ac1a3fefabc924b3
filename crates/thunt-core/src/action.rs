//! Action values and the reduced drill/step action set.

use serde::Serialize;
use std::fmt;

/// One of the five task actions.
///
/// The discriminant order (drill, north, east, south, west) is the
/// canonical action index used by transition matrices and persisted
/// action tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Action {
    /// Reveal the current node.
    Drill = 0,
    /// Move one row up (`-d`).
    North = 1,
    /// Move one column right (`+1`).
    East = 2,
    /// Move one row down (`+d`).
    South = 3,
    /// Move one column left (`-1`).
    West = 4,
}

impl Action {
    /// All actions in canonical index order.
    pub const ALL: [Action; 5] = [
        Action::Drill,
        Action::North,
        Action::East,
        Action::South,
        Action::West,
    ];

    /// Action space cardinality.
    pub const COUNT: usize = 5;

    /// Canonical index in `0..5`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action for a canonical index, or `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Node-number offset of this action on a grid of side `dim`.
    ///
    /// Drill is 0, north `-dim`, east `+1`, south `+dim`, west `-1`.
    pub fn value(self, dim: usize) -> i64 {
        let d = dim as i64;
        match self {
            Action::Drill => 0,
            Action::North => -d,
            Action::East => 1,
            Action::South => d,
            Action::West => -1,
        }
    }

    /// Inverse of [`Action::value`].
    ///
    /// On a 1-wide grid north/south and west/east share offsets; the
    /// first match in canonical order wins.
    pub fn from_value(value: i64, dim: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.value(dim) == value)
    }

    /// Lowercase direction name, used for artifact names and display.
    pub fn name(self) -> &'static str {
        match self {
            Action::Drill => "drill",
            Action::North => "north",
            Action::East => "east",
            Action::South => "south",
            Action::West => "west",
        }
    }

    /// Whether this action moves the agent.
    pub fn is_step(self) -> bool {
        self != Action::Drill
    }

    /// The observability class of this action.
    pub fn reduced(self) -> ReducedAction {
        if self.is_step() {
            ReducedAction::Step
        } else {
            ReducedAction::Drill
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actions as seen by the observation model: the four movements collapse
/// into a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ReducedAction {
    /// A drill action.
    Drill = 0,
    /// Any movement action.
    Step = 1,
}

impl ReducedAction {
    /// Both reduced actions in index order.
    pub const ALL: [ReducedAction; 2] = [ReducedAction::Drill, ReducedAction::Step];

    /// Index in `0..2`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, used for artifact names.
    pub fn name(self) -> &'static str {
        match self {
            ReducedAction::Drill => "drill",
            ReducedAction::Step => "step",
        }
    }
}

impl fmt::Display for ReducedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_on_three_by_three() {
        let values: Vec<i64> = Action::ALL.iter().map(|a| a.value(3)).collect();
        assert_eq!(values, vec![0, -3, 1, 3, -1]);
    }

    #[test]
    fn value_roundtrip() {
        for a in Action::ALL {
            assert_eq!(Action::from_value(a.value(4), 4), Some(a));
        }
        assert_eq!(Action::from_value(2, 4), None);
    }

    #[test]
    fn index_roundtrip() {
        for (i, a) in Action::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
            assert_eq!(Action::from_index(i), Some(*a));
        }
        assert_eq!(Action::from_index(5), None);
    }

    #[test]
    fn movements_reduce_to_step() {
        assert_eq!(Action::Drill.reduced(), ReducedAction::Drill);
        for a in &Action::ALL[1..] {
            assert_eq!(a.reduced(), ReducedAction::Step);
        }
    }
}
