//! Top-level engine errors.

use crate::action::MoveError;

/// Error returned by session and decision-engine operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The move was rejected.
    #[display("Invalid move: {}", _0)]
    InvalidMove(MoveError),

    /// The decision engine was asked to move on a full board.
    #[display("No moves available: the board is full")]
    NoMovesAvailable,

    /// No winning line fits the requested geometry.
    #[display(
        "Invalid configuration: board size {} with line length {} has no winning lines",
        board_size,
        line_length
    )]
    InvalidConfiguration {
        /// Requested board size.
        board_size: usize,
        /// Requested line length.
        line_length: usize,
    },
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::InvalidMove(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for GameError {
    fn from(err: MoveError) -> Self {
        GameError::InvalidMove(err)
    }
}
