//! Win detection.

use crate::geometry::Line;
use crate::types::{Board, Mark, Square};
use tracing::instrument;

/// Mark shared by every cell of `line`, if the line is complete.
pub fn line_owner(board: &Board, line: &Line) -> Option<Mark> {
    let (first, rest) = line.cells().split_first()?;
    let mark = board.get(*first)?.mark()?;
    rest.iter()
        .all(|&c| board.get(c) == Some(Square::Occupied(mark)))
        .then_some(mark)
}

/// Finds the first complete line in generation order.
///
/// The returned line is a copy annotated with the winning mark. When several
/// lines are complete at once the earliest one wins, so repeated calls on the
/// same board agree.
#[instrument(skip(board, lines))]
pub fn find_winner(board: &Board, lines: &[Line]) -> Option<Line> {
    lines
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| line.with_mark(mark)))
}
