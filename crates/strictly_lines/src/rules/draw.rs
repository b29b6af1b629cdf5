//! Board fill checks.

use crate::types::{Board, Square};
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full board with no winner is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Checks if every cell is empty (no move has been made yet).
#[instrument(skip(board))]
pub fn is_board_empty(board: &Board) -> bool {
    board.squares().iter().all(|s| *s == Square::Empty)
}
