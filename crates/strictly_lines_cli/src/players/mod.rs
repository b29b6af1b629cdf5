//! Player trait and implementations.

mod heuristic;
mod human;
mod random;

pub use heuristic::HeuristicPlayer;
pub use human::{HumanPlayer, Quit};
pub use random::RandomPlayer;

use anyhow::Result;
use std::fmt;
use std::str::FromStr;
use strictly_lines::{GameSession, Mark, StrategyLevel};

/// Anything that can choose a cell for the session's opponent seat.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player.
    ///
    /// Returns a zero-based cell index. The orchestrator validates it.
    async fn get_move(&mut self, session: &GameSession) -> Result<usize>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether a rejected move should be asked for again.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Scripted opponent for the engine in simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Challenger {
    /// Uniformly random legal moves.
    Random,
    /// A second heuristic engine pinned to one level.
    Engine(StrategyLevel),
}

impl Challenger {
    /// Builds the player for `mark`, seeded when `seed` is given.
    pub fn into_player(self, mark: Mark, seed: Option<u64>) -> Box<dyn Player> {
        match self {
            Challenger::Random => Box::new(RandomPlayer::new("Random", seed)),
            Challenger::Engine(level) => Box::new(HeuristicPlayer::new(
                format!("Engine({level})"),
                mark,
                level,
                seed,
            )),
        }
    }
}

impl FromStr for Challenger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("random") {
            return Ok(Challenger::Random);
        }
        s.parse::<StrategyLevel>()
            .map(Challenger::Engine)
            .map_err(|_| {
                format!(
                    "unknown challenger '{s}': \
                     expected random, naive, basic, medium, advanced or pro"
                )
            })
    }
}

impl fmt::Display for Challenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Challenger::Random => write!(f, "random"),
            Challenger::Engine(level) => write!(f, "{level}"),
        }
    }
}
