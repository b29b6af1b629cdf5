//! Winning-line geometry.
//!
//! Every straight run of `line_length` consecutive cells on a
//! `board_size × board_size` board is a winning line. Lines are grown
//! forward from each starting cell in four directions, so no line is
//! produced twice. The result depends only on the two parameters and is
//! shared read-only by win detection and the decision engine.

use crate::error::GameError;
use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Direction a line is grown in from its first cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Down and to the right.
    AntiDiagonal,
    /// Down and to the left.
    Diagonal,
}

impl Direction {
    /// Display angle of the line in degrees.
    pub fn angle(self) -> u16 {
        match self {
            Direction::Horizontal => 0,
            Direction::Vertical => 90,
            Direction::AntiDiagonal => 45,
            Direction::Diagonal => 135,
        }
    }

    /// Cells of the line starting at `(row, col)`, or `None` if it leaves the board.
    fn walk(self, size: usize, len: usize, row: usize, col: usize) -> Option<Vec<usize>> {
        let reach = len - 1;
        let fits_down = row + reach < size;
        let fits_right = col + reach < size;
        let fits_left = col >= reach;

        let step: fn(usize, usize, usize) -> (usize, usize) = match self {
            Direction::Horizontal if fits_right => |r, c, k| (r, c + k),
            Direction::Vertical if fits_down => |r, c, k| (r + k, c),
            Direction::AntiDiagonal if fits_down && fits_right => |r, c, k| (r + k, c + k),
            Direction::Diagonal if fits_down && fits_left => |r, c, k| (r + k, c - k),
            _ => return None,
        };

        Some(
            (0..len)
                .map(|k| {
                    let (r, c) = step(row, col, k);
                    r * size + c
                })
                .collect(),
        )
    }
}

/// A run of `line_length` cells that wins the match when uniformly marked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    cells: Vec<usize>,
    direction: Direction,
    mark: Option<Mark>,
}

impl Line {
    /// Cell indices in growth order.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Direction the line was grown in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Display angle in degrees.
    pub fn angle(&self) -> u16 {
        self.direction.angle()
    }

    /// Winning mark, set only on lines reported as complete.
    pub fn mark(&self) -> Option<Mark> {
        self.mark
    }

    /// Returns a copy annotated with the mark that completed it.
    pub fn with_mark(&self, mark: Mark) -> Self {
        Self {
            mark: Some(mark),
            ..self.clone()
        }
    }

    /// Checks whether the line passes through `cell`.
    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(&cell)
    }
}

/// Generates every winning line for a board, in scan order.
///
/// Cells are visited row by row; for each one the horizontal, vertical,
/// anti-diagonal and diagonal lines are tried in that order. A one-cell
/// line is the same in every direction, so with `line_length == 1` each
/// cell yields a single horizontal line. Parameters that admit no line (a
/// zero size or length, or a length beyond the board) yield an empty set.
#[instrument]
pub fn generate_lines(board_size: usize, line_length: usize) -> Vec<Line> {
    if board_size == 0 || line_length == 0 || line_length > board_size {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for row in 0..board_size {
        for col in 0..board_size {
            for direction in <Direction as strum::IntoEnumIterator>::iter() {
                if line_length == 1 && direction != Direction::Horizontal {
                    continue;
                }
                if let Some(cells) = direction.walk(board_size, line_length, row, col) {
                    lines.push(Line {
                        cells,
                        direction,
                        mark: None,
                    });
                }
            }
        }
    }

    debug!(count = lines.len(), "Generated winning lines");
    lines
}

/// Validated line set for one board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineGeometry {
    board_size: usize,
    line_length: usize,
    lines: Vec<Line>,
}

impl LineGeometry {
    /// Builds the line set, rejecting configurations on which nobody can win.
    #[instrument]
    pub fn new(board_size: usize, line_length: usize) -> Result<Self, GameError> {
        let lines = generate_lines(board_size, line_length);
        if lines.is_empty() {
            return Err(GameError::InvalidConfiguration {
                board_size,
                line_length,
            });
        }
        Ok(Self {
            board_size,
            line_length,
            lines,
        })
    }

    /// Board size the lines were generated for.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Length of every line.
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// All lines in generation order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false for a validated geometry.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
