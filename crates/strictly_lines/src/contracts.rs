//! Contract-based move validation.
//!
//! Preconditions decide whether a move may be applied; postconditions check
//! that applying it kept the session invariants.

use crate::action::{Move, MoveError};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::session::GameSession;
use tracing::instrument;

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the match has no result yet.
pub struct MatchNotOver;

impl MatchNotOver {
    /// Rejects moves on a finished match.
    pub fn check(_mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if session.state().is_terminal() {
            Err(MoveError::MatchOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the cell index addresses the board.
pub struct CellInRange;

impl CellInRange {
    /// Rejects indices past the last cell.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        let cells = session.board().cell_count();
        if mov.cell >= cells {
            Err(MoveError::OutOfRange {
                cell: mov.cell,
                cells,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects occupied cells.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if session.board().is_empty_at(mov.cell) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(mov.cell))
        }
    }
}

/// Precondition: it is the moving mark's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves out of turn.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if mov.mark == session.to_move() {
            Ok(())
        } else {
            Err(MoveError::WrongTurn(mov.mark))
        }
    }
}

/// Composite precondition for a legal move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions, in order.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        MatchNotOver::check(mov, session)?;
        CellInRange::check(mov, session)?;
        CellIsEmpty::check(mov, session)?;
        PlayersTurn::check(mov, session)?;
        Ok(())
    }
}

/// Contract for applying a move to a session.
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, session)
    }

    fn post(_before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {descriptions}"))
        })
    }
}
