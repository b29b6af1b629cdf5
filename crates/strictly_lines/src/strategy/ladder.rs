//! Adaptive difficulty ladder.

use super::StrategyLevel;
use crate::score::ScoreTally;
use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of a post-match adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelChange {
    /// The engine moved up a level.
    Raised {
        /// Level before the match.
        from: StrategyLevel,
        /// Level after the match.
        to: StrategyLevel,
    },
    /// The engine moved down a level.
    Lowered {
        /// Level before the match.
        from: StrategyLevel,
        /// Level after the match.
        to: StrategyLevel,
    },
    /// The level stayed put.
    Unchanged(StrategyLevel),
}

impl LevelChange {
    /// Level in effect after the adjustment.
    pub fn level(self) -> StrategyLevel {
        match self {
            LevelChange::Raised { to, .. } | LevelChange::Lowered { to, .. } => to,
            LevelChange::Unchanged(level) => level,
        }
    }
}

/// Tracks the engine's current level across matches.
///
/// The level moves at most one step per completed match and depends only on
/// that match's winner and the cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyLadder {
    level: StrategyLevel,
    adaptive: bool,
}

impl StrategyLadder {
    /// Creates an adaptive ladder at `level`.
    pub fn new(level: StrategyLevel) -> Self {
        Self {
            level,
            adaptive: true,
        }
    }

    /// Creates a ladder that never leaves `level`.
    pub fn fixed(level: StrategyLevel) -> Self {
        Self {
            level,
            adaptive: false,
        }
    }

    /// Current level.
    pub fn level(&self) -> StrategyLevel {
        self.level
    }

    /// Whether outcomes move the level.
    pub fn is_adaptive(&self) -> bool {
        self.adaptive
    }

    /// Adjusts the level after a completed match.
    ///
    /// `score` must already include this match's result. `own` is the
    /// engine's mark and `winner` is `None` for a tie.
    #[instrument(skip(self, score), fields(level = %self.level))]
    pub fn record_outcome(
        &mut self,
        score: &ScoreTally,
        own: Mark,
        winner: Option<Mark>,
    ) -> LevelChange {
        let from = self.level;
        if !self.adaptive {
            return LevelChange::Unchanged(from);
        }

        let diff = i64::from(score.wins(own)) - i64::from(score.wins(own.opponent()));
        let opponent_won = winner == Some(own.opponent());
        let engine_won = winner == Some(own);
        debug!(diff, opponent_won, engine_won, "Evaluating ladder step");

        let change = if opponent_won && diff < 0 && from < StrategyLevel::MAX {
            LevelChange::Raised {
                from,
                to: from.raised(),
            }
        } else if opponent_won && from == StrategyLevel::MIN {
            LevelChange::Raised {
                from,
                to: from.raised(),
            }
        } else if engine_won && diff > 2 && from > StrategyLevel::MIN {
            LevelChange::Lowered {
                from,
                to: from.lowered(),
            }
        } else {
            LevelChange::Unchanged(from)
        };

        self.level = change.level();
        change
    }
}

impl Default for StrategyLadder {
    fn default() -> Self {
        Self::new(StrategyLevel::MIN)
    }
}
