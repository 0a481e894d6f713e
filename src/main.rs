//! Noughts - Unified CLI
//!
//! Terminal tic-tac-toe plus engine analysis commands.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts::cli::{Cli, Command};
use noughts::report::{run_self_play, BestMoveReport};
use noughts::session::OpponentMode;
use noughts::{tui, AppConfig};
use noughts_core::{Board, Player};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            opponent,
            delay_ms,
        } => run_play(config, opponent, delay_ms).await,
        Command::BestMove { board, player, json } => {
            init_stderr_logging();
            run_best_move(board, player, json)
        }
        Command::SelfPlay { rounds, first } => {
            init_stderr_logging();
            run_self_play_command(rounds, first)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Run the terminal UI
async fn run_play(config_path: PathBuf, opponent: Option<OpponentMode>, delay_ms: Option<u64>) -> Result<()> {
    let mut config = AppConfig::load_or_default(&config_path)?;
    if let Some(opponent) = opponent {
        config = config.with_opponent(opponent);
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_thinking_delay_ms(delay_ms);
    }

    // Log to file to avoid interfering with the TUI
    let log_file = std::fs::File::create(config.log_file())?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(config = %config_path.display(), ?config, "Starting noughts TUI");
    tui::run(config).await
}

/// Print the engine's choice for a board
#[instrument(skip(board), fields(board = %board.compact()))]
fn run_best_move(board: Board, player: Player, json: bool) -> Result<()> {
    let report = BestMoveReport::analyse(&board, player)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}\n", board);
        print!("{}", report);
    }
    Ok(())
}

/// Play engine against engine and print the tally
#[instrument]
fn run_self_play_command(rounds: u32, first: Player) -> Result<()> {
    let (results, tally) = run_self_play(rounds, first)?;
    for (number, round) in results.iter().enumerate() {
        println!(
            "Round {}: {} starts, {} after {} moves",
            number + 1,
            round.starter,
            round.status,
            round.moves
        );
    }
    println!(
        "X wins: {}  O wins: {}  Draws: {}",
        tally.x_wins(),
        tally.o_wins(),
        tally.draws()
    );
    Ok(())
}
