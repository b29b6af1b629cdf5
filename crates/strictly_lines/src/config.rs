//! Session configuration.

use crate::strategy::StrategyLevel;
use crate::types::Mark;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Parameters for a new game session.
///
/// Deserializes with defaults for missing fields, so a partial TOML table
/// is enough.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Rows and columns of the board.
    board_size: usize,

    /// Cells in a winning line.
    line_length: usize,

    /// Mark played by the decision engine.
    engine_mark: Mark,

    /// Mark that opens the first match.
    first_mark: Mark,

    /// Level the engine starts at.
    starting_level: StrategyLevel,

    /// Whether match outcomes move the level.
    adaptive: bool,

    /// Seed for reproducible engine tie-breaks.
    #[setters(strip_option)]
    seed: Option<u64>,
}

impl GameConfig {
    /// Configuration for a `board_size × board_size` board with runs of `line_length`.
    pub fn new(board_size: usize, line_length: usize) -> Self {
        Self {
            board_size,
            line_length,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            line_length: 3,
            engine_mark: Mark::O,
            first_mark: Mark::X,
            starting_level: StrategyLevel::Naive,
            adaptive: true,
            seed: None,
        }
    }
}
