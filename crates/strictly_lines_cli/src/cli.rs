//! Command-line interface for strictly_lines.

use crate::players::Challenger;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_lines::{GameConfig, Mark, StrategyLevel};

/// Strictly Lines - N-in-a-row against an adaptive opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_lines")]
#[command(about = "N-in-a-row game engine with an adaptive heuristic opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, default_value = "strictly_lines.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the engine in the terminal
    Play {
        /// Game settings
        #[command(flatten)]
        game: GameArgs,

        /// Stop after this many matches (default: until you quit)
        #[arg(short, long)]
        matches: Option<usize>,

        /// Commit engine moves immediately
        #[arg(long)]
        no_delay: bool,
    },

    /// Pit the engine against a scripted challenger
    Simulate {
        /// Game settings
        #[command(flatten)]
        game: GameArgs,

        /// Number of matches to play
        #[arg(short = 'n', long, default_value = "100")]
        matches: usize,

        /// Challenger: "random" or a strategy level (naive, basic, medium, advanced, pro)
        #[arg(long, default_value = "random")]
        challenger: Challenger,

        /// Print the final board of every match
        #[arg(long)]
        show_boards: bool,
    },

    /// Print the winning lines of a board
    Lines {
        /// Board side length
        #[arg(short, long, default_value = "3")]
        board_size: usize,

        /// Cells in a winning line
        #[arg(short, long, default_value = "3")]
        line_length: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Game settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Board side length
    #[arg(short, long)]
    pub board_size: Option<usize>,

    /// Cells in a winning line
    #[arg(short, long)]
    pub line_length: Option<usize>,

    /// Starting strategy level of the engine
    #[arg(long)]
    pub level: Option<StrategyLevel>,

    /// Keep the engine at its starting level
    #[arg(long)]
    pub fixed: bool,

    /// Mark that opens the first match
    #[arg(long)]
    pub first: Option<Mark>,

    /// Seed for reproducible engine tie-breaks
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(size) = self.board_size {
            config = config.with_board_size(size);
        }
        if let Some(length) = self.line_length {
            config = config.with_line_length(length);
        }
        if let Some(level) = self.level {
            config = config.with_starting_level(level);
        }
        if self.fixed {
            config = config.with_adaptive(false);
        }
        if let Some(mark) = self.first {
            config = config.with_first_mark(mark);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "strictly_lines",
            "simulate",
            "-n",
            "10",
            "--challenger",
            "pro",
            "--board-size",
            "4",
            "--fixed",
        ])
        .unwrap();

        match cli.command {
            Command::Simulate {
                game,
                matches,
                challenger,
                ..
            } => {
                assert_eq!(matches, 10);
                assert_eq!(challenger, Challenger::Engine(StrategyLevel::Pro));
                assert_eq!(game.board_size, Some(4));
                assert!(game.fixed);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_play_level_case_insensitive() {
        let cli = Cli::try_parse_from([
            "strictly_lines",
            "play",
            "--level",
            "Medium",
            "--first",
            "O",
        ])
        .unwrap();
        let Command::Play { game, .. } = cli.command else {
            panic!("expected play");
        };
        assert_eq!(game.level, Some(StrategyLevel::Medium));
        assert_eq!(game.first, Some(Mark::O));
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let args = GameArgs {
            line_length: Some(4),
            seed: Some(3),
            ..GameArgs::default()
        };
        let base = GameConfig::new(5, 3).with_starting_level(StrategyLevel::Basic);
        let config = args.apply(base);
        assert_eq!(*config.board_size(), 5);
        assert_eq!(*config.line_length(), 4);
        assert_eq!(*config.starting_level(), StrategyLevel::Basic);
        assert_eq!(*config.seed(), Some(3));
        assert!(*config.adaptive());
    }
}
