//! Game rules.
//!
//! Pure functions evaluating a board against its line set. Rules are kept
//! apart from board storage so both the session and the decision engine can
//! call them.

pub mod draw;
pub mod win;

pub use draw::{is_board_empty, is_full};
pub use win::find_winner;
