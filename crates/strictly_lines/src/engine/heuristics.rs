//! Heuristic rules as pure functions of board, lines and the engine's mark.

use crate::geometry::Line;
use crate::rules::is_board_empty;
use crate::strategy::Heuristic;
use crate::types::{Board, Mark, Square};
use derive_new::new;
use tracing::{instrument, trace};

/// What a heuristic proposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// Exactly this cell.
    Cell(usize),
    /// Any one of these cells, picked uniformly. Never empty.
    Among(Vec<usize>),
}

/// A line one move away from completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Threat {
    /// The single empty cell on the line.
    pub cell: usize,
    /// Mark holding every other cell of the line.
    pub mark: Mark,
}

/// Classifies `line` as a threat: one empty cell, the rest sharing one mark.
fn threat_on(board: &Board, line: &Line) -> Option<Threat> {
    let mut empty = None;
    let mut owner: Option<Mark> = None;
    for &cell in line.cells() {
        match board.get(cell)? {
            Square::Empty => {
                if empty.replace(cell).is_some() {
                    return None;
                }
            }
            Square::Occupied(mark) => match owner {
                Some(held) if held != mark => return None,
                _ => owner = Some(mark),
            },
        }
    }
    Some(Threat::new(empty?, owner?))
}

/// All threats on the board, in line generation order.
#[instrument(skip(board, lines))]
pub fn threats(board: &Board, lines: &[Line]) -> Vec<Threat> {
    lines.iter().filter_map(|l| threat_on(board, l)).collect()
}

/// Corner cells: top-left, top-right, bottom-left, bottom-right.
pub fn corners(size: usize) -> Vec<usize> {
    if size == 0 {
        return Vec::new();
    }
    let last = size * size - 1;
    let mut cells = vec![0, size - 1, last + 1 - size, last];
    cells.dedup();
    cells
}

/// The center cell; only odd boards have one.
pub fn center(size: usize) -> Option<usize> {
    (size % 2 == 1).then(|| (size / 2) * size + size / 2)
}

/// Middle cell(s) of each edge that are not corners, ascending.
pub fn sides(size: usize) -> Vec<usize> {
    if size == 0 {
        return Vec::new();
    }
    let mids: Vec<usize> = if size % 2 == 1 {
        vec![size / 2]
    } else {
        vec![size / 2 - 1, size / 2]
    };
    let corners = corners(size);
    let mut cells: Vec<usize> = mids
        .iter()
        .flat_map(|&m| {
            [
                m,
                m * size,
                m * size + size - 1,
                (size - 1) * size + m,
            ]
        })
        .filter(|c| !corners.contains(c))
        .collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Corner pairs `(seen, answer)`, checked in this order.
pub fn corner_pairs(size: usize) -> Vec<(usize, usize)> {
    match corners(size).as_slice() {
        &[top_left, top_right, bottom_left, bottom_right] => vec![
            (top_left, bottom_right),
            (top_right, bottom_left),
            (bottom_left, top_right),
            (bottom_right, top_left),
        ],
        _ => Vec::new(),
    }
}

fn among(cells: Vec<usize>) -> Option<Proposal> {
    (!cells.is_empty()).then_some(Proposal::Among(cells))
}

fn empty_of(board: &Board, cells: Vec<usize>) -> Vec<usize> {
    cells.into_iter().filter(|&c| board.is_empty_at(c)).collect()
}

impl Heuristic {
    /// Evaluates this heuristic for `own` on `board`.
    ///
    /// Returns `None` when the heuristic does not apply. Every proposed cell
    /// is empty.
    pub fn propose(self, board: &Board, lines: &[Line], own: Mark) -> Option<Proposal> {
        let size = board.size();
        let proposal = match self {
            Heuristic::Opening => {
                if !is_board_empty(board) {
                    return None;
                }
                let mut cells = corners(size);
                cells.extend(center(size));
                cells.sort_unstable();
                cells.dedup();
                among(cells)
            }
            Heuristic::WinOrBlock => {
                let found = threats(board, lines);
                found
                    .iter()
                    .find(|t| t.mark == own)
                    .or_else(|| found.first())
                    .map(|t| Proposal::Cell(t.cell))
            }
            Heuristic::OppositeCorner => {
                let opponent = Square::Occupied(own.opponent());
                corner_pairs(size)
                    .into_iter()
                    .find(|&(seen, answer)| {
                        board.get(seen) == Some(opponent) && board.is_empty_at(answer)
                    })
                    .map(|(_, answer)| Proposal::Cell(answer))
            }
            Heuristic::Center => center(size)
                .filter(|&c| board.is_empty_at(c))
                .map(Proposal::Cell),
            Heuristic::Corner => among(empty_of(board, corners(size))),
            Heuristic::Side => among(empty_of(board, sides(size))),
            Heuristic::Any => among(board.empty_cells()),
        };
        trace!(heuristic = %self, ?proposal, "Heuristic evaluated");
        proposal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::generate_lines;

    #[test]
    fn test_landmarks_three() {
        assert_eq!(corners(3), vec![0, 2, 6, 8]);
        assert_eq!(center(3), Some(4));
        assert_eq!(sides(3), vec![1, 3, 5, 7]);
        assert_eq!(corner_pairs(3), vec![(0, 8), (2, 6), (6, 2), (8, 0)]);
    }

    #[test]
    fn test_landmarks_four() {
        assert_eq!(corners(4), vec![0, 3, 12, 15]);
        assert_eq!(center(4), None);
        assert_eq!(sides(4), vec![1, 2, 4, 7, 8, 11, 13, 14]);
        assert_eq!(corner_pairs(4), vec![(0, 15), (3, 12), (12, 3), (15, 0)]);
    }

    #[test]
    fn test_landmarks_tiny() {
        assert_eq!(corners(1), vec![0]);
        assert!(corner_pairs(1).is_empty());
        assert!(sides(1).is_empty());
        assert!(sides(2).is_empty());
    }

    #[test]
    fn test_threat_requires_uniform_marks() {
        let lines = generate_lines(3, 3);
        let mut board = Board::new(3);
        board.set(0, Square::Occupied(Mark::X)).unwrap();
        board.set(1, Square::Occupied(Mark::O)).unwrap();
        assert!(threats(&board, &lines).is_empty());
        board.set(4, Square::Occupied(Mark::X)).unwrap();
        assert_eq!(threats(&board, &lines), vec![Threat::new(8, Mark::X)]);
    }

    #[test]
    fn test_length_one_lines_have_no_threats() {
        let lines = generate_lines(2, 1);
        assert!(threats(&Board::new(2), &lines).is_empty());
    }

    #[test]
    fn test_threats_follow_generation_order() {
        // X X . .
        // . . . .
        // O O . .
        // O . . .
        let lines = generate_lines(4, 3);
        let mut board = Board::new(4);
        for c in [0, 1] {
            board.set(c, Square::Occupied(Mark::X)).unwrap();
        }
        for c in [8, 9, 12] {
            board.set(c, Square::Occupied(Mark::O)).unwrap();
        }

        assert_eq!(
            threats(&board, &lines),
            vec![
                Threat::new(2, Mark::X),
                Threat::new(4, Mark::O),
                Threat::new(6, Mark::O),
                Threat::new(10, Mark::O),
            ]
        );
        // O owns three threats; the earliest of them wins over X's earlier one.
        assert_eq!(
            Heuristic::WinOrBlock.propose(&board, &lines, Mark::O),
            Some(Proposal::Cell(4))
        );
        assert_eq!(
            Heuristic::WinOrBlock.propose(&board, &lines, Mark::X),
            Some(Proposal::Cell(2))
        );
    }

    #[test]
    fn test_threats_on_longer_lines() {
        let lines = generate_lines(5, 4);
        let mut board = Board::new(5);
        for c in [0, 1, 2] {
            board.set(c, Square::Occupied(Mark::X)).unwrap();
        }
        for c in [10, 11, 12] {
            board.set(c, Square::Occupied(Mark::O)).unwrap();
        }
        assert_eq!(
            threats(&board, &lines),
            vec![Threat::new(3, Mark::X), Threat::new(13, Mark::O)]
        );

        // Two of four is not yet a threat.
        board.set(12, Square::Empty).unwrap();
        assert_eq!(threats(&board, &lines), vec![Threat::new(3, Mark::X)]);
    }

    #[test]
    fn test_opposite_corner_on_four_by_four() {
        let lines = generate_lines(4, 3);
        let mut board = Board::new(4);
        board.set(3, Square::Occupied(Mark::X)).unwrap();
        assert_eq!(
            Heuristic::OppositeCorner.propose(&board, &lines, Mark::O),
            Some(Proposal::Cell(12))
        );
        board.set(12, Square::Occupied(Mark::O)).unwrap();
        assert_eq!(Heuristic::OppositeCorner.propose(&board, &lines, Mark::O), None);
    }

    #[test]
    fn test_opening_only_on_empty_board() {
        let lines = generate_lines(3, 3);
        let mut board = Board::new(3);
        assert_eq!(
            Heuristic::Opening.propose(&board, &lines, Mark::O),
            Some(Proposal::Among(vec![0, 2, 4, 6, 8]))
        );
        board.set(4, Square::Occupied(Mark::X)).unwrap();
        assert_eq!(Heuristic::Opening.propose(&board, &lines, Mark::O), None);
    }

    #[test]
    fn test_opposite_corner_answers_opponent_only() {
        let lines = generate_lines(3, 3);
        let mut board = Board::new(3);
        board.set(2, Square::Occupied(Mark::O)).unwrap();
        assert_eq!(Heuristic::OppositeCorner.propose(&board, &lines, Mark::O), None);
        board.set(8, Square::Occupied(Mark::X)).unwrap();
        assert_eq!(
            Heuristic::OppositeCorner.propose(&board, &lines, Mark::O),
            Some(Proposal::Cell(0))
        );
    }

    #[test]
    fn test_center_taken() {
        let lines = generate_lines(3, 3);
        let mut board = Board::new(3);
        board.set(4, Square::Occupied(Mark::X)).unwrap();
        assert_eq!(Heuristic::Center.propose(&board, &lines, Mark::O), None);
    }

    #[test]
    fn test_corner_and_side_skip_occupied() {
        let lines = generate_lines(3, 3);
        let mut board = Board::new(3);
        for c in [0, 1, 8] {
            board.set(c, Square::Occupied(Mark::X)).unwrap();
        }
        assert_eq!(
            Heuristic::Corner.propose(&board, &lines, Mark::O),
            Some(Proposal::Among(vec![2, 6]))
        );
        assert_eq!(
            Heuristic::Side.propose(&board, &lines, Mark::O),
            Some(Proposal::Among(vec![3, 5, 7]))
        );
    }
}
