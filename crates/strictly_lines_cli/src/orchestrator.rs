//! Match orchestration between the engine and a challenger.

use crate::config::ThinkingDelay;
use crate::players::{Player, Quit};
use anyhow::Result;
use derive_getters::Getters;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::fmt;
use std::time::Duration;
use strictly_lines::{
    GameSession, Heuristic, LevelChange, Line, Mark, MoveOutcome, Outcome, ScoreTally,
    StrategyLevel,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Display name of the session's own engine.
const ENGINE_NAME: &str = "Engine";

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A new match began.
    MatchStarted {
        /// One-based match number.
        number: usize,
        /// Mark that moves first.
        opener: Mark,
        /// Engine level for this match.
        level: StrategyLevel,
    },
    /// Board redrawn after a change.
    StateChanged(String),
    /// Waiting for the challenger.
    AwaitingMove {
        /// Challenger name.
        player: String,
        /// Challenger mark.
        mark: Mark,
        /// Number of cells on the board.
        cells: usize,
    },
    /// Engine is thinking.
    EngineThinking(Duration),
    /// Move was made.
    MoveMade {
        /// Who moved.
        player: String,
        /// Mark placed.
        mark: Mark,
        /// Zero-based cell.
        cell: usize,
        /// Rule that chose the cell, for engine moves.
        heuristic: Option<Heuristic>,
    },
    /// A challenger move was refused.
    MoveRejected {
        /// Who tried to move.
        player: String,
        /// Why it was refused.
        reason: String,
    },
    /// Match ended.
    MatchOver {
        /// One-based match number.
        number: usize,
        /// Winner or tie.
        outcome: Outcome,
        /// Completed line, if any.
        winning_line: Option<Line>,
        /// Final board.
        board: String,
        /// Score after this match.
        score: ScoreTally,
        /// How the engine's level moved.
        level_change: LevelChange,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::MatchStarted {
                number,
                opener,
                level,
            } => write!(f, "=== Match {number} === {opener} opens, engine plays {level}"),
            GameEvent::StateChanged(board) => write!(f, "\n{board}\n"),
            GameEvent::AwaitingMove { player, mark, cells } => {
                write!(f, "{player} ({mark}), pick a cell 1-{cells} or q to quit:")
            }
            GameEvent::EngineThinking(delay) => {
                write!(f, "{ENGINE_NAME} is thinking ({} ms)...", delay.as_millis())
            }
            GameEvent::MoveMade {
                player,
                mark,
                cell,
                heuristic,
            } => {
                write!(f, "{player} ({mark}) takes {}", cell + 1)?;
                if let Some(heuristic) = heuristic {
                    write!(f, " [{heuristic}]")?;
                }
                Ok(())
            }
            GameEvent::MoveRejected { player, reason } => {
                write!(f, "{player}: move rejected, {reason}")
            }
            GameEvent::MatchOver {
                number,
                outcome,
                winning_line,
                score,
                level_change,
                ..
            } => {
                write!(f, "Match {number}: {outcome}")?;
                if let Some(line) = winning_line {
                    let cells: Vec<String> =
                        line.cells().iter().map(|c| (c + 1).to_string()).collect();
                    write!(f, " on {} ({}°)", cells.join("-"), line.angle())?;
                }
                write!(f, " | score {score} | {}", describe_change(level_change))
            }
        }
    }
}

fn describe_change(change: &LevelChange) -> String {
    match change {
        LevelChange::Raised { from, to } => format!("engine level raised {from} -> {to}"),
        LevelChange::Lowered { from, to } => format!("engine level lowered {from} -> {to}"),
        LevelChange::Unchanged(level) => format!("engine level stays {level}"),
    }
}

/// Summary of an orchestrated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_more::Display)]
#[display("{matches} matches, {ties} ties, score {score}, engine level {level}")]
pub struct Report {
    /// Completed matches.
    matches: usize,
    /// Matches without a winner.
    ties: usize,
    /// Cumulative score.
    score: ScoreTally,
    /// Engine level at the end.
    level: StrategyLevel,
}

/// Runs matches between the session's engine and one challenger.
pub struct Orchestrator {
    session: GameSession,
    challenger: Box<dyn Player>,
    thinking: ThinkingDelay,
    rng: Pcg32,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    ///
    /// The challenger plays the mark opposite the session's engine.
    pub fn new(
        session: GameSession,
        challenger: Box<dyn Player>,
        thinking: ThinkingDelay,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            challenger,
            thinking,
            rng: Pcg32::from_rng(&mut rand::rng()),
            event_tx,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Plays up to `matches` matches, or until the challenger quits.
    #[instrument(skip(self), fields(challenger = %self.challenger.name()))]
    pub async fn run(&mut self, matches: Option<usize>) -> Result<Report> {
        info!("Starting game orchestration");
        let mut played = 0;
        let mut ties = 0;

        while matches.is_none_or(|limit| played < limit) {
            if played > 0 {
                self.session.reset_match();
            }
            match self.play_match(played + 1).await {
                Ok(outcome) => {
                    played += 1;
                    if outcome.is_tie() {
                        ties += 1;
                    }
                }
                Err(e) if e.is::<Quit>() => {
                    info!(played, "Challenger quit");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Report {
            matches: played,
            ties,
            score: *self.session.score(),
            level: self.session.level(),
        })
    }

    /// Plays one match to its end.
    #[instrument(skip(self))]
    pub async fn play_match(&mut self, number: usize) -> Result<Outcome> {
        self.event_tx.send(GameEvent::MatchStarted {
            number,
            opener: self.session.to_move(),
            level: self.session.level(),
        })?;
        self.event_tx
            .send(GameEvent::StateChanged(self.session.board().display()))?;

        loop {
            let outcome = if self.session.to_move() == self.session.engine_mark() {
                self.engine_turn().await?
            } else {
                self.challenger_turn().await?
            };

            self.event_tx
                .send(GameEvent::StateChanged(self.session.board().display()))?;

            if let Some(result) = outcome.state.outcome() {
                let level_change = outcome
                    .level_change
                    .unwrap_or(LevelChange::Unchanged(self.session.level()));
                self.event_tx.send(GameEvent::MatchOver {
                    number,
                    outcome: result,
                    winning_line: outcome.winning_line,
                    board: self.session.board().display(),
                    score: *self.session.score(),
                    level_change,
                })?;
                return Ok(result);
            }
        }
    }

    /// Pauses, then commits the engine's choice.
    async fn engine_turn(&mut self) -> Result<MoveOutcome> {
        let delay = self.thinking.sample(&mut self.rng);
        if !delay.is_zero() {
            self.event_tx.send(GameEvent::EngineThinking(delay))?;
            tokio::time::sleep(delay).await;
        }

        let mark = self.session.engine_mark();
        let decision = self.session.compute_opponent_decision()?;
        let outcome = self.session.apply_move(decision.cell, mark)?;

        self.event_tx.send(GameEvent::MoveMade {
            player: ENGINE_NAME.to_string(),
            mark,
            cell: decision.cell,
            heuristic: Some(decision.heuristic),
        })?;
        Ok(outcome)
    }

    /// Asks the challenger until it produces a legal move.
    async fn challenger_turn(&mut self) -> Result<MoveOutcome> {
        let mark = self.session.to_move();
        let player = self.challenger.name().to_string();

        loop {
            if self.challenger.is_interactive() {
                self.event_tx.send(GameEvent::AwaitingMove {
                    player: player.clone(),
                    mark,
                    cells: self.session.board().cell_count(),
                })?;
            }

            debug!(%player, "Waiting for move");
            let cell = self.challenger.get_move(&self.session).await?;

            match self.session.apply_move(cell, mark) {
                Ok(outcome) => {
                    self.event_tx.send(GameEvent::MoveMade {
                        player,
                        mark,
                        cell,
                        heuristic: None,
                    })?;
                    return Ok(outcome);
                }
                Err(e) if self.challenger.is_interactive() => {
                    self.event_tx.send(GameEvent::MoveRejected {
                        player: player.clone(),
                        reason: e.to_string(),
                    })?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
