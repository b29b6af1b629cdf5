//! Difficulty levels and the heuristics each level enables.
//!
//! A level is a fixed, ordered list of [`Heuristic`]s. The decision engine
//! walks that list and stops at the first heuristic that proposes a cell.

mod ladder;

pub use ladder::{LevelChange, StrategyLadder};

use serde::{Deserialize, Serialize};

/// A single move-selection rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Heuristic {
    /// Random corner or center, only on an empty board.
    Opening,
    /// Complete an own line, otherwise block the opponent's.
    WinOrBlock,
    /// Answer an opponent corner with the opposite corner.
    OppositeCorner,
    /// Take the center cell.
    Center,
    /// Random empty corner.
    Corner,
    /// Random empty edge midpoint.
    Side,
    /// Random empty cell.
    Any,
}

/// Difficulty tier, ascending.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StrategyLevel {
    /// Random play.
    #[default]
    Naive,
    /// Wins and blocks, otherwise sides.
    Basic,
    /// Adds openings and corners.
    Medium,
    /// Adds the center.
    Advanced,
    /// Every heuristic.
    Pro,
}

impl StrategyLevel {
    /// Lowest level.
    pub const MIN: Self = StrategyLevel::Naive;
    /// Highest level.
    pub const MAX: Self = StrategyLevel::Pro;

    /// Heuristics evaluated at this level, in order.
    pub fn heuristics(self) -> &'static [Heuristic] {
        use Heuristic::*;
        match self {
            StrategyLevel::Naive => &[Any],
            StrategyLevel::Basic => &[WinOrBlock, Side, Any],
            StrategyLevel::Medium => &[Opening, WinOrBlock, Corner, Any],
            StrategyLevel::Advanced => &[Opening, WinOrBlock, Center, Corner, Any],
            StrategyLevel::Pro => &[
                Opening,
                WinOrBlock,
                OppositeCorner,
                Center,
                Corner,
                Side,
                Any,
            ],
        }
    }

    /// Position on the ladder, `0..=4`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next level up, saturating at [`Self::MAX`].
    pub fn raised(self) -> Self {
        Self::from_repr(self.index() + 1).unwrap_or(Self::MAX)
    }

    /// Next level down, saturating at [`Self::MIN`].
    pub fn lowered(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_repr)
            .unwrap_or(Self::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_level_ends_with_any() {
        for level in StrategyLevel::iter() {
            assert_eq!(level.heuristics().last(), Some(&Heuristic::Any));
        }
    }

    #[test]
    fn test_pro_uses_every_heuristic_in_order() {
        let all: Vec<_> = Heuristic::iter().collect();
        assert_eq!(StrategyLevel::Pro.heuristics(), all.as_slice());
    }

    #[test]
    fn test_raise_and_lower_saturate() {
        assert_eq!(StrategyLevel::Pro.raised(), StrategyLevel::Pro);
        assert_eq!(StrategyLevel::Naive.lowered(), StrategyLevel::Naive);
        assert_eq!(StrategyLevel::Naive.raised(), StrategyLevel::Basic);
        assert_eq!(StrategyLevel::Pro.lowered(), StrategyLevel::Advanced);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(StrategyLevel::from_str("Advanced"), Ok(StrategyLevel::Advanced));
        assert_eq!(StrategyLevel::from_str("pro"), Ok(StrategyLevel::Pro));
        assert_eq!(StrategyLevel::Medium.to_string(), "medium");
        assert!(StrategyLevel::from_str("expert").is_err());
    }

    #[test]
    fn test_indices_ascend() {
        let indices: Vec<_> = StrategyLevel::iter().map(StrategyLevel::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(StrategyLevel::Naive < StrategyLevel::Pro);
    }
}
