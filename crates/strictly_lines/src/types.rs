//! Core domain types: marks, squares and the board.

use crate::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A contestant's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (first contestant).
    X,
    /// Mark O (second contestant).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Square `size × size` board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board with `size` rows and columns.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Builds a board from row-major squares.
    ///
    /// Returns `None` unless `squares.len()` is a perfect square.
    pub fn from_squares(squares: Vec<Square>) -> Option<Self> {
        let size = (0..=squares.len()).find(|n| n * n >= squares.len())?;
        (size * size == squares.len()).then_some(Self { size, squares })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    /// Gets the square at the given index.
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Sets the square at the given index.
    pub fn set(&mut self, pos: usize, square: Square) -> Result<(), MoveError> {
        let cells = self.squares.len();
        let slot = self
            .squares
            .get_mut(pos)
            .ok_or(MoveError::OutOfRange { cell: pos, cells })?;
        *slot = square;
        Ok(())
    }

    /// Checks if the cell at `pos` exists and is empty.
    pub fn is_empty_at(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Indices of all empty cells, ascending.
    #[instrument(skip(self))]
    pub fn empty_cells(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Converts `(row, col)` to a flat index.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }

    /// Converts a flat index to `(row, col)`.
    pub fn coords_of(&self, pos: usize) -> Option<(usize, usize)> {
        (pos < self.squares.len()).then(|| (pos / self.size, pos % self.size))
    }

    /// Resets every cell to empty.
    pub(crate) fn clear(&mut self) {
        self.squares.fill(Square::Empty);
    }

    /// Formats the board as a text grid; empty cells show their 1-based number.
    pub fn display(&self) -> String {
        let width = self.squares.len().to_string().len();
        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = row * self.size + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&format!("{symbol:>width$}"));
                if col + 1 < self.size {
                    result.push('|');
                }
            }
            if row + 1 < self.size {
                result.push('\n');
                let rule = vec!["-".repeat(width); self.size].join("+");
                result.push_str(&rule);
                result.push('\n');
            }
        }
        result
    }
}
