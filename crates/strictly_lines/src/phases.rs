//! Match lifecycle states.

use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// State of the current match.
///
/// `NotStarted → InProgress → {Won | Tied}`; the terminal states hold until
/// the match is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// Board is empty, no move yet.
    #[default]
    NotStarted,
    /// At least one move, no result yet.
    InProgress,
    /// A line was completed by this mark.
    Won(Mark),
    /// The board filled with no completed line.
    Tied,
}

impl MatchState {
    /// Checks if the match has a result.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchState::Won(_) | MatchState::Tied)
    }

    /// Result of a terminal match.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            MatchState::Won(mark) => Some(Outcome::Winner(mark)),
            MatchState::Tied => Some(Outcome::Tie),
            MatchState::NotStarted | MatchState::InProgress => None,
        }
    }
}

/// Result of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// This mark completed a line.
    Winner(Mark),
    /// Nobody completed a line.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Tie => None,
        }
    }

    /// Returns true if nobody won.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{mark} wins"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
