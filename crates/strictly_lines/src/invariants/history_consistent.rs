//! History consistency invariant: history length matches occupied cells.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Square;

/// Invariant: every occupied cell has exactly one move in the history.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let occupied = session
            .board()
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();

        session.history().len() == occupied
    }

    fn description() -> &'static str {
        "History length matches number of occupied cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::Mark;

    #[test]
    fn test_holds_after_reset() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.apply_move(3, Mark::X).unwrap();
        assert!(HistoryConsistentInvariant::holds(&session));
        session.reset_match();
        assert!(HistoryConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_missing_history_violates() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.apply_move(3, Mark::X).unwrap();
        session.history.clear();
        assert!(!HistoryConsistentInvariant::holds(&session));
    }
}
