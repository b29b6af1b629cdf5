//! Human player reading cell numbers from a line channel.

use super::Player;
use anyhow::Result;
use derive_more::{Display, Error};
use strictly_lines::GameSession;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// The human asked to stop playing.
#[derive(Debug, Clone, Copy, Display, Error)]
#[display("player quit")]
pub struct Quit;

/// Human player typing one-based cell numbers.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _session: &GameSession) -> Result<usize> {
        while let Some(line) = self.input_rx.recv().await {
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
                return Err(Quit.into());
            }
            match input.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    debug!(player = %self.name, cell = n - 1, "Human chose cell");
                    return Ok(n - 1);
                }
                _ => warn!(input, "Expected a cell number or q"),
            }
        }

        Err(Quit.into())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
