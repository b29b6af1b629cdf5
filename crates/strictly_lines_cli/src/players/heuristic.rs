//! Heuristic engine pinned to one level, used as a simulation challenger.

use super::Player;
use anyhow::Result;
use strictly_lines::{DecisionEngine, GameSession, Mark, StrategyLevel};
use tracing::debug;

/// Plays `mark` with the heuristics of a fixed level.
pub struct HeuristicPlayer {
    name: String,
    mark: Mark,
    level: StrategyLevel,
    engine: DecisionEngine,
}

impl HeuristicPlayer {
    /// Creates a fixed-level heuristic player.
    pub fn new(
        name: impl Into<String>,
        mark: Mark,
        level: StrategyLevel,
        seed: Option<u64>,
    ) -> Self {
        let engine = match seed {
            Some(seed) => DecisionEngine::with_seed(seed),
            None => DecisionEngine::new(),
        };
        Self {
            name: name.into(),
            mark,
            level,
            engine,
        }
    }
}

#[async_trait::async_trait]
impl Player for HeuristicPlayer {
    async fn get_move(&mut self, session: &GameSession) -> Result<usize> {
        let decision = self.engine.select_move(
            session.board(),
            session.lines(),
            self.mark,
            self.level,
        )?;
        debug!(
            player = %self.name,
            cell = decision.cell,
            heuristic = %decision.heuristic,
            "Challenger chose cell"
        );
        Ok(decision.cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
