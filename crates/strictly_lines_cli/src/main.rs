//! Strictly Lines - terminal front end
//!
//! Play N-in-a-row against the adaptive engine, run simulations, or inspect
//! the winning lines of a board.

#![warn(missing_docs)]

mod cli;
mod config;
mod orchestrator;
mod players;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use config::{AppConfig, ThinkingDelay};
use orchestrator::{GameEvent, Orchestrator};
use players::{Challenger, HumanPlayer};
use std::io::BufRead;
use strictly_lines::{GameSession, LineGeometry};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play {
            game,
            matches,
            no_delay,
        } => run_play(config, game, matches, no_delay).await,
        Command::Simulate {
            game,
            matches,
            challenger,
            show_boards,
        } => run_simulate(config, game, matches, challenger, show_boards).await,
        Command::Lines {
            board_size,
            line_length,
            json,
        } => print_lines(board_size, line_length, json),
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_lines=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Human versus engine on stdin/stdout.
#[instrument(skip(config, game))]
async fn run_play(
    config: AppConfig,
    game: GameArgs,
    matches: Option<usize>,
    no_delay: bool,
) -> Result<()> {
    let game = game.apply(config.game().clone());
    let thinking = if no_delay {
        ThinkingDelay::none()
    } else {
        *config.thinking()
    };
    let session = GameSession::new(game)?;
    info!(human = %session.engine_mark().opponent(), "Starting interactive play");

    // A plain thread: blocking stdin must not hold up runtime shutdown.
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let human = Box::new(HumanPlayer::new("You", line_rx));
    let mut orchestrator = Orchestrator::new(session, human, thinking, event_tx);
    let handle = tokio::spawn(async move { orchestrator.run(matches).await });

    while let Some(event) = event_rx.recv().await {
        println!("{event}");
    }

    let report = handle.await??;
    println!("\n{report}");
    Ok(())
}

/// Engine versus a scripted challenger.
#[instrument(skip(config, game))]
async fn run_simulate(
    config: AppConfig,
    game: GameArgs,
    matches: usize,
    challenger: Challenger,
    show_boards: bool,
) -> Result<()> {
    let game = game.apply(config.game().clone());
    let seed = *game.seed();
    let session = GameSession::new(game)?;
    let player = challenger.into_player(
        session.engine_mark().opponent(),
        seed.map(|s| s.wrapping_add(1)),
    );
    info!(%challenger, matches, "Starting simulation");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if let GameEvent::MatchOver { ref board, .. } = event {
                println!("{event}");
                if show_boards {
                    println!("{board}\n");
                }
            }
        }
    });

    let mut orchestrator = Orchestrator::new(session, player, ThinkingDelay::none(), event_tx);
    let report = orchestrator.run(Some(matches)).await?;
    drop(orchestrator);
    printer.await?;

    println!("\n{report}");
    Ok(())
}

/// Prints every winning line of a board.
#[instrument]
fn print_lines(board_size: usize, line_length: usize, json: bool) -> Result<()> {
    let geometry = LineGeometry::new(board_size, line_length)?;

    if json {
        println!("{}", serde_json::to_string_pretty(geometry.lines())?);
        return Ok(());
    }

    println!("{:>4}  {:>5}  {:<13} cells", "#", "angle", "direction");
    for (i, line) in geometry.lines().iter().enumerate() {
        let cells: Vec<String> = line.cells().iter().map(|c| c.to_string()).collect();
        println!(
            "{:>4}  {:>4}°  {:<13} {}",
            i + 1,
            line.angle(),
            line.direction().to_string(),
            cells.join(" ")
        );
    }
    println!(
        "\n{} lines on a {}x{} board, {} in a row",
        geometry.len(),
        board_size,
        board_size,
        line_length
    );
    Ok(())
}
