//! Game session: one board, its score, and the engine's ladder.
//!
//! The session is the surface a presentation layer talks to. It validates
//! and applies moves, detects the end of a match, keeps the score, moves
//! the difficulty ladder and asks the decision engine for the engine's
//! moves. It never commits an engine move itself.

use crate::action::{Move, MoveError};
use crate::config::GameConfig;
use crate::contracts::{Contract, MoveContract};
use crate::engine::{Decision, DecisionEngine};
use crate::error::GameError;
use crate::geometry::{Line, LineGeometry};
use crate::phases::{MatchState, Outcome};
use crate::rules::{find_winner, is_full};
use crate::score::ScoreTally;
use crate::strategy::{LevelChange, StrategyLadder, StrategyLevel};
use crate::types::{Board, Mark, Square};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Match state after the move.
    pub state: MatchState,
    /// The completed line, annotated with its mark, if the move won.
    pub winning_line: Option<Line>,
    /// Ladder adjustment, present only when the move ended the match.
    pub level_change: Option<LevelChange>,
}

/// A game session between the engine and one opponent.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    geometry: Arc<LineGeometry>,
    pub(crate) board: Board,
    to_move: Mark,
    state: MatchState,
    pub(crate) history: Vec<Move>,
    winning_line: Option<Line>,
    score: ScoreTally,
    last_outcome: Option<Outcome>,
    ladder: StrategyLadder,
    engine: DecisionEngine,
}

impl GameSession {
    /// Starts a session: builds the line set once and an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] when no line fits the board.
    #[instrument]
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let geometry = LineGeometry::new(*config.board_size(), *config.line_length())?;
        Ok(Self::with_geometry(config, Arc::new(geometry)))
    }

    /// Starts a session on an already generated line set.
    ///
    /// The board size comes from `geometry`; the size fields of `config`
    /// are overwritten to match.
    #[instrument(skip(geometry))]
    pub fn with_geometry(config: GameConfig, geometry: Arc<LineGeometry>) -> Self {
        let config = config
            .with_board_size(geometry.board_size())
            .with_line_length(geometry.line_length());
        let ladder = if *config.adaptive() {
            StrategyLadder::new(*config.starting_level())
        } else {
            StrategyLadder::fixed(*config.starting_level())
        };
        let engine = match config.seed() {
            Some(seed) => DecisionEngine::with_seed(*seed),
            None => DecisionEngine::new(),
        };

        info!(
            board_size = geometry.board_size(),
            line_length = geometry.line_length(),
            lines = geometry.len(),
            engine_mark = %config.engine_mark(),
            level = %ladder.level(),
            "Creating game session"
        );

        Self {
            board: Board::new(geometry.board_size()),
            to_move: *config.first_mark(),
            state: MatchState::NotStarted,
            history: Vec::new(),
            winning_line: None,
            score: ScoreTally::default(),
            last_outcome: None,
            ladder,
            engine,
            geometry,
            config,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared line set.
    pub fn geometry(&self) -> &Arc<LineGeometry> {
        &self.geometry
    }

    /// Winning lines in generation order.
    pub fn lines(&self) -> &[Line] {
        self.geometry.lines()
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Current match state.
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Moves of the current match.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Completed line of the current match, if it was won.
    pub fn winning_line(&self) -> Option<&Line> {
        self.winning_line.as_ref()
    }

    /// Cumulative score.
    pub fn score(&self) -> &ScoreTally {
        &self.score
    }

    /// Outcome of the most recently finished match.
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Mark played by the engine.
    pub fn engine_mark(&self) -> Mark {
        *self.config.engine_mark()
    }

    /// Engine's current level.
    pub fn level(&self) -> StrategyLevel {
        self.ladder.level()
    }

    /// Difficulty ladder.
    pub fn ladder(&self) -> &StrategyLadder {
        &self.ladder
    }

    /// Applies a move for `mark` at `cell`.
    ///
    /// On success the turn passes to the other mark. If the move completes a
    /// line or fills the board, the score and ladder are updated.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMove`] if the match is over, the cell is
    /// out of range or occupied, or it is not `mark`'s turn.
    #[instrument(skip(self), fields(state = ?self.state, to_move = %self.to_move))]
    pub fn apply_move(&mut self, cell: usize, mark: Mark) -> Result<MoveOutcome, GameError> {
        let action = Move::new(mark, cell);
        MoveContract::pre(self, &action)
            .inspect_err(|e| warn!(error = %e, "Move rejected"))?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set(cell, Square::Occupied(mark))?;
        self.history.push(action);
        self.to_move = mark.opponent();
        self.state = MatchState::InProgress;

        let mut level_change = None;
        if let Some(line) = find_winner(&self.board, self.geometry.lines()) {
            let winner = line.mark().unwrap_or(mark);
            debug!(cells = ?line.cells(), angle = line.angle(), "Line completed");
            self.state = MatchState::Won(winner);
            self.winning_line = Some(line);
            level_change = Some(self.finish_match(Some(winner)));
        } else if is_full(&self.board) {
            self.state = MatchState::Tied;
            level_change = Some(self.finish_match(None));
        }

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            warn!(error = %e, "Postcondition failed, restoring session");
            *self = before;
            return Err(e.into());
        }

        debug!(state = ?self.state, "Move applied");
        Ok(MoveOutcome {
            state: self.state,
            winning_line: self.winning_line.clone(),
            level_change,
        })
    }

    /// Records a finished match and moves the ladder.
    fn finish_match(&mut self, winner: Option<Mark>) -> LevelChange {
        if let Some(mark) = winner {
            self.score.record_win(mark);
        }
        self.last_outcome = self.state.outcome();
        let own = self.engine_mark();
        let change = self.ladder.record_outcome(&self.score, own, winner);

        info!(
            outcome = ?self.last_outcome,
            score = %self.score,
            ?change,
            "Match finished"
        );
        change
    }

    /// Asks the engine for its next cell without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoMovesAvailable`] on a full board, and
    /// [`GameError::InvalidMove`] if the match is over or it is not the
    /// engine's turn.
    pub fn compute_opponent_move(&mut self) -> Result<usize, GameError> {
        self.compute_opponent_decision().map(|d| d.cell)
    }

    /// Like [`Self::compute_opponent_move`], also reporting which heuristic fired.
    #[instrument(skip(self), fields(level = %self.ladder.level()))]
    pub fn compute_opponent_decision(&mut self) -> Result<Decision, GameError> {
        if is_full(&self.board) {
            return Err(GameError::NoMovesAvailable);
        }
        if self.state.is_terminal() {
            return Err(MoveError::MatchOver.into());
        }
        let own = self.engine_mark();
        if self.to_move != own {
            return Err(MoveError::WrongTurn(own).into());
        }

        self.engine
            .select_move(&self.board, self.geometry.lines(), own, self.ladder.level())
    }

    /// Clears the board for a new match.
    ///
    /// Score, ladder level and the last outcome are kept. The turn flag is
    /// not touched, so the mark that did not make the final move opens.
    #[instrument(skip(self))]
    pub fn reset_match(&mut self) {
        self.board.clear();
        self.history.clear();
        self.winning_line = None;
        self.state = MatchState::NotStarted;
        debug!(to_move = %self.to_move, level = %self.ladder.level(), "Match reset");
    }
}
