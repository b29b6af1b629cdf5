//! Cumulative win counts.

use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// Wins per mark across every match of a session. Never decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    x: u32,
    o: u32,
}

impl ScoreTally {
    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Records one win for `mark`.
    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x = self.x.saturating_add(1),
            Mark::O => self.o = self.o.saturating_add(1),
        }
    }

    /// Total decided matches.
    pub fn total(&self) -> u32 {
        self.x.saturating_add(self.o)
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} : {} O", self.x, self.o)
    }
}
