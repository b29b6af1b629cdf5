//! Alternating turn invariant.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: marks alternate and the turn flag follows the last mover.
///
/// The first mover of a match may be either mark (the turn flag carries
/// over across resets), but no mark moves twice in a row.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();

        if history.windows(2).any(|w| w[0].mark == w[1].mark) {
            return false;
        }

        match history.last() {
            Some(last) => session.to_move() == last.mark.opponent(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Marks alternate turns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::config::GameConfig;
    use crate::types::Mark;

    #[test]
    fn test_empty_session_holds() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        assert!(AlternatingTurnInvariant::holds(&session));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        for (cell, mark) in [(0, Mark::X), (4, Mark::O), (2, Mark::X), (6, Mark::O)] {
            session.apply_move(cell, mark).unwrap();
        }
        assert!(AlternatingTurnInvariant::holds(&session));
        assert_eq!(session.to_move(), Mark::X);
    }

    #[test]
    fn test_same_mark_twice_violates() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.apply_move(0, Mark::X).unwrap();
        session.history.push(Move::new(Mark::X, 1));
        assert!(!AlternatingTurnInvariant::holds(&session));
    }
}
