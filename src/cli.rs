//! Command-line interface for noughts.

use crate::session::OpponentMode;
use clap::{Parser, Subcommand};
use noughts_core::{Board, Player};
use std::path::PathBuf;

/// Noughts - Tic-tac-toe against a perfect minimax opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe in the terminal with an unbeatable computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to the TOML config file
        #[arg(short, long, default_value = "noughts.toml")]
        config: PathBuf,

        /// Override the opponent mode from the config file
        #[arg(long, value_enum)]
        opponent: Option<OpponentMode>,

        /// Override the computer's thinking delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the engine's move for a board
    BestMove {
        /// Board as nine cells, `x`, `o` or `_`, row by row (e.g. `xx_oo____`)
        board: Board,

        /// Mark the engine plays
        #[arg(short, long)]
        player: Player,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play against itself
    SelfPlay {
        /// Number of rounds
        #[arg(short, long, default_value = "10")]
        rounds: u32,

        /// Starter of the first round; alternates afterwards
        #[arg(long, default_value = "X")]
        first: Player,
    },
}
