//! Random player for simulations.

use super::Player;
use anyhow::Result;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use strictly_lines::GameSession;
use tracing::debug;

/// Picks uniformly among the empty cells.
pub struct RandomPlayer {
    name: String,
    rng: Pcg32,
}

impl RandomPlayer {
    /// Creates a random player, reproducible when `seed` is given.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Self {
            name: name.into(),
            rng,
        }
    }
}

#[async_trait::async_trait]
impl Player for RandomPlayer {
    async fn get_move(&mut self, session: &GameSession) -> Result<usize> {
        let empty = session.board().empty_cells();
        let cell = empty
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No valid moves available"))?;
        debug!(player = %self.name, cell, "Random player chose cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
