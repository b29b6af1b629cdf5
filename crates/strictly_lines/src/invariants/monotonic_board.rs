//! Monotonic board invariant: cells never change once marked.

use super::Invariant;
use crate::session::GameSession;
use crate::types::{Board, Square};

/// Invariant: replaying the match history reproduces the board.
///
/// Each move lands on an empty cell and no cell is ever overwritten.
pub struct MonotonicBoardInvariant;

impl Invariant<GameSession> for MonotonicBoardInvariant {
    fn holds(session: &GameSession) -> bool {
        let mut reconstructed = Board::new(session.board().size());

        for mov in session.history() {
            if !reconstructed.is_empty_at(mov.cell) {
                return false;
            }
            if reconstructed.set(mov.cell, Square::Occupied(mov.mark)).is_err() {
                return false;
            }
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
