//! First-class move types.
//!
//! Moves are domain events: a mark placed on a cell. They can be validated
//! before application and kept as match history.

use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a mark placed on a cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Flat cell index (`row * size + col`).
    pub cell: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(mark: Mark, cell: usize) -> Self {
        Self { mark, cell }
    }

    /// Returns the mark being placed.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the target cell.
    pub fn cell(&self) -> usize {
        self.cell
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.cell)
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The index does not address a cell on this board.
    #[display("Cell {} is out of range (board has {} cells)", cell, cells)]
    OutOfRange {
        /// Requested index.
        cell: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// It is not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),

    /// The match already has a result.
    #[display("Match is already over")]
    MatchOver,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
