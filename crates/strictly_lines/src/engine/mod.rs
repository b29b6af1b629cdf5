//! Heuristic move selection.
//!
//! The engine walks the heuristics of the requested [`StrategyLevel`] in
//! order and commits to the first one that proposes a cell. Randomness only
//! breaks ties inside a proposal; which heuristic fires is fully determined
//! by the board.

mod heuristics;

pub use heuristics::{Proposal, Threat, center, corner_pairs, corners, sides, threats};

use crate::error::GameError;
use crate::geometry::Line;
use crate::rules::is_full;
use crate::strategy::{Heuristic, StrategyLevel};
use crate::types::{Board, Mark};
use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A selected cell and the heuristic that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Chosen empty cell.
    pub cell: usize,
    /// Heuristic that fired.
    pub heuristic: Heuristic,
}

/// Rule-based opponent.
///
/// Owns only its random number generator; board, lines and level are passed
/// in on every call.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rng: Pcg32,
}

impl DecisionEngine {
    /// Creates an engine seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates an engine whose tie-breaks are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Picks an empty cell for `own` using the heuristics of `level`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoMovesAvailable`] if the board is full.
    #[instrument(skip(self, board, lines), fields(empty = board.empty_cells().len()))]
    pub fn select_move(
        &mut self,
        board: &Board,
        lines: &[Line],
        own: Mark,
        level: StrategyLevel,
    ) -> Result<Decision, GameError> {
        if is_full(board) {
            return Err(GameError::NoMovesAvailable);
        }

        for &heuristic in level.heuristics() {
            let Some(proposal) = heuristic.propose(board, lines, own) else {
                continue;
            };
            let cell = match proposal {
                Proposal::Cell(cell) => Some(cell),
                Proposal::Among(cells) => cells.choose(&mut self.rng).copied(),
            };
            if let Some(cell) = cell {
                debug!(%heuristic, cell, "Move selected");
                return Ok(Decision { cell, heuristic });
            }
        }

        Err(GameError::NoMovesAvailable)
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::generate_lines;
    use crate::types::Square;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    fn board_from(pattern: &str) -> Board {
        let squares = pattern
            .chars()
            .map(|c| match c {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                _ => Square::Empty,
            })
            .collect();
        Board::from_squares(squares).unwrap()
    }

    #[test]
    fn test_naive_picks_any_empty_cell() {
        let lines = generate_lines(3, 3);
        let board = board_from("....X....");
        for seed in 0..50 {
            let mut engine = DecisionEngine::with_seed(seed);
            let decision = engine
                .select_move(&board, &lines, Mark::O, StrategyLevel::Naive)
                .unwrap();
            assert_ne!(decision.cell, 4);
            assert!(decision.cell < 9);
            assert_eq!(decision.heuristic, Heuristic::Any);
        }
    }

    #[test]
    fn test_win_preferred_over_block() {
        let lines = generate_lines(3, 3);
        let board = board_from("XX.OO....");
        for level in StrategyLevel::iter().filter(|l| *l != StrategyLevel::Naive) {
            let mut engine = DecisionEngine::with_seed(1);
            let as_x = engine.select_move(&board, &lines, Mark::X, level).unwrap();
            assert_eq!(as_x.cell, 2, "level {level}");
            assert_eq!(as_x.heuristic, Heuristic::WinOrBlock);
            let as_o = engine.select_move(&board, &lines, Mark::O, level).unwrap();
            assert_eq!(as_o.cell, 5, "level {level}");
        }
    }

    #[test]
    fn test_single_threat_is_blocked() {
        let lines = generate_lines(3, 3);
        let board = board_from("X..X....O");
        let mut engine = DecisionEngine::with_seed(3);
        let decision = engine
            .select_move(&board, &lines, Mark::O, StrategyLevel::Basic)
            .unwrap();
        assert_eq!(
            decision,
            Decision {
                cell: 6,
                heuristic: Heuristic::WinOrBlock
            }
        );
    }

    #[test]
    fn test_basic_falls_through_to_side() {
        let lines = generate_lines(3, 3);
        let board = board_from("X...X...O");
        let mut engine = DecisionEngine::with_seed(3);
        let decision = engine
            .select_move(&board, &lines, Mark::O, StrategyLevel::Basic)
            .unwrap();
        assert_eq!(decision.heuristic, Heuristic::Side);
        assert!([1, 3, 5, 7].contains(&decision.cell));
    }

    #[test]
    fn test_fork_blocks_first_threat() {
        let lines = generate_lines(3, 3);
        // X threatens 2 (top row) and 6 (left column); O has no line of its own.
        let board = board_from("XX.XO..O.");
        let mut engine = DecisionEngine::with_seed(9);
        let decision = engine
            .select_move(&board, &lines, Mark::O, StrategyLevel::Pro)
            .unwrap();
        assert_eq!(
            decision,
            Decision {
                cell: 2,
                heuristic: Heuristic::WinOrBlock
            }
        );
    }

    #[test]
    fn test_pro_opening_covers_every_candidate() {
        let lines = generate_lines(3, 3);
        let board = Board::new(3);
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut engine = DecisionEngine::with_seed(seed);
            let decision = engine
                .select_move(&board, &lines, Mark::X, StrategyLevel::Pro)
                .unwrap();
            assert_eq!(decision.heuristic, Heuristic::Opening);
            seen.insert(decision.cell);
        }
        assert_eq!(seen, HashSet::from([0, 2, 4, 6, 8]));
    }

    #[test]
    fn test_pro_takes_opposite_corner() {
        let lines = generate_lines(3, 3);
        let board = board_from("X........");
        let mut engine = DecisionEngine::with_seed(0);
        let decision = engine
            .select_move(&board, &lines, Mark::O, StrategyLevel::Pro)
            .unwrap();
        assert_eq!(
            decision,
            Decision {
                cell: 8,
                heuristic: Heuristic::OppositeCorner
            }
        );
    }

    #[test]
    fn test_advanced_takes_center() {
        let lines = generate_lines(3, 3);
        let board = board_from(".X.......");
        let mut engine = DecisionEngine::with_seed(0);
        let decision = engine
            .select_move(&board, &lines, Mark::O, StrategyLevel::Advanced)
            .unwrap();
        assert_eq!(
            decision,
            Decision {
                cell: 4,
                heuristic: Heuristic::Center
            }
        );
    }

    #[test]
    fn test_medium_takes_corner_when_center_gone() {
        let lines = generate_lines(3, 3);
        let board = board_from("....X....");
        let mut engine = DecisionEngine::with_seed(5);
        let decision = engine
            .select_move(&board, &lines, Mark::O, StrategyLevel::Medium)
            .unwrap();
        assert_eq!(decision.heuristic, Heuristic::Corner);
        assert!([0, 2, 6, 8].contains(&decision.cell));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let lines = generate_lines(3, 3);
        let board = board_from("XOXOXXOXO");
        let mut engine = DecisionEngine::with_seed(0);
        for level in StrategyLevel::iter() {
            assert_eq!(
                engine.select_move(&board, &lines, Mark::O, level),
                Err(GameError::NoMovesAvailable)
            );
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let lines = generate_lines(5, 4);
        let board = Board::new(5);
        let mut a = DecisionEngine::with_seed(77);
        let mut b = DecisionEngine::with_seed(77);
        for _ in 0..10 {
            assert_eq!(
                a.select_move(&board, &lines, Mark::X, StrategyLevel::Naive),
                b.select_move(&board, &lines, Mark::X, StrategyLevel::Naive)
            );
        }
    }

    #[test]
    fn test_never_selects_occupied_cell() {
        for (size, len) in [(3, 3), (4, 3), (5, 4)] {
            let lines = generate_lines(size, len);
            for seed in 0..40 {
                let mut engine = DecisionEngine::with_seed(seed);
                let mut board = Board::new(size);
                let mut mark = Mark::X;
                let levels: Vec<_> = StrategyLevel::iter().collect();
                let mut turn = 0;
                while !is_full(&board) && crate::rules::find_winner(&board, &lines).is_none() {
                    for &level in &levels {
                        let d = engine.select_move(&board, &lines, mark, level).unwrap();
                        assert!(board.is_empty_at(d.cell));
                    }
                    let level = levels[(seed as usize + turn) % levels.len()];
                    let d = engine.select_move(&board, &lines, mark, level).unwrap();
                    board.set(d.cell, Square::Occupied(mark)).unwrap();
                    mark = mark.opponent();
                    turn += 1;
                }
            }
        }
    }
}
