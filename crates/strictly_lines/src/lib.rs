//! Strictly Lines - type-safe N-in-a-row game engine
//!
//! Square boards of any size, a configurable winning line length, and a
//! heuristic opponent whose strength follows the score.
//!
//! # Architecture
//!
//! - **Geometry**: every winning line of a board, generated once and shared
//! - **Rules**: winner and full-board detection over the line set
//! - **Engine**: ordered heuristics with seeded random tie-breaking
//! - **Strategy**: five levels and a ladder that moves between them
//! - **Session**: move validation, scoring and match lifecycle
//!
//! # Example
//!
//! ```
//! use strictly_lines::{GameConfig, GameSession, Mark, MatchState};
//!
//! # fn example() -> Result<(), strictly_lines::GameError> {
//! let mut session = GameSession::new(GameConfig::default().with_seed(7))?;
//!
//! session.apply_move(4, Mark::X)?;
//! let reply = session.compute_opponent_move()?;
//! let outcome = session.apply_move(reply, Mark::O)?;
//! assert_eq!(outcome.state, MatchState::InProgress);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod contracts;
mod engine;
mod error;
mod geometry;
mod invariants;
mod phases;
mod rules;
mod score;
mod session;
mod strategy;
mod types;

// Crate-level exports - Core types
pub use action::{Move, MoveError};
pub use error::GameError;
pub use types::{Board, Mark, Square};

// Crate-level exports - Line geometry
pub use geometry::{Direction, Line, LineGeometry, generate_lines};

// Crate-level exports - Rules
pub use rules::win::line_owner;
pub use rules::{find_winner, is_board_empty, is_full};

// Crate-level exports - Decision engine
pub use engine::{
    Decision, DecisionEngine, Proposal, Threat, center, corner_pairs, corners, sides, threats,
};

// Crate-level exports - Strategy
pub use strategy::{Heuristic, LevelChange, StrategyLadder, StrategyLevel};

// Crate-level exports - Session
pub use config::GameConfig;
pub use phases::{MatchState, Outcome};
pub use score::ScoreTally;
pub use session::{GameSession, MoveOutcome};

// Crate-level exports - Verification
pub use contracts::{
    CellInRange, CellIsEmpty, Contract, LegalMove, MatchNotOver, MoveContract, PlayersTurn,
};
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MonotonicBoardInvariant, SessionInvariants,
};
