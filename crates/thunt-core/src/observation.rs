//! Node colors and the five-element observation set.

use serde::Serialize;
use std::fmt;

/// Revealed color of a grid node.
///
/// Every node starts black; drilling turns it grey (not a hiding spot)
/// or blue (a hiding spot).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum NodeColor {
    /// Not yet drilled.
    #[default]
    Black = 0,
    /// Drilled, not a hiding spot.
    Grey = 1,
    /// Drilled, a hiding spot.
    Blue = 2,
}

impl NodeColor {
    /// Numeric color code (0 black, 1 grey, 2 blue).
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Color for a numeric code.
    pub fn from_value(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Black),
            1 => Some(Self::Grey),
            2 => Some(Self::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Black => "black",
            Self::Grey => "grey",
            Self::Blue => "blue",
        })
    }
}

/// A task observation: treasure flag plus the color of the current node.
///
/// The treasure is only ever hidden on a hiding spot, so a treasure seen
/// on a grey node is impossible and that pair is not part of the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Observation {
    /// Whether the treasure is at the agent's node.
    pub treasure: bool,
    /// Color of the agent's node.
    pub color: NodeColor,
}

impl Observation {
    /// The valid observations in canonical column order:
    /// `(0,black) (0,grey) (0,blue) (1,black) (1,blue)`.
    pub const ALL: [Observation; 5] = [
        Observation::new(false, NodeColor::Black),
        Observation::new(false, NodeColor::Grey),
        Observation::new(false, NodeColor::Blue),
        Observation::new(true, NodeColor::Black),
        Observation::new(true, NodeColor::Blue),
    ];

    /// Observation space cardinality.
    pub const COUNT: usize = 5;

    /// Construct an observation.
    pub const fn new(treasure: bool, color: NodeColor) -> Self {
        Self { treasure, color }
    }

    /// Canonical column index, or `None` for the impossible pair (1, grey).
    pub fn index(self) -> Option<usize> {
        Self::ALL.iter().position(|o| *o == self)
    }

    /// Observation at a canonical column index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// `(treasure_flag, color_code)` as stored in the observation table.
    pub fn pair(self) -> (u8, u8) {
        (u8::from(self.treasure), self.color.value())
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (flag, _) = self.pair();
        write!(f, "({flag}, {})", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treasure_on_grey_is_excluded() {
        assert_eq!(Observation::new(true, NodeColor::Grey).index(), None);
        assert_eq!(Observation::ALL.len(), Observation::COUNT);
    }

    #[test]
    fn pairs_match_table_order() {
        let pairs: Vec<(u8, u8)> = Observation::ALL.iter().map(|o| o.pair()).collect();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)]);
    }

    #[test]
    fn color_codes_roundtrip() {
        for v in 0..3 {
            assert_eq!(NodeColor::from_value(v).map(NodeColor::value), Some(v));
        }
        assert_eq!(NodeColor::from_value(3), None);
    }
}
