//! Reports printed by the non-interactive subcommands.

use noughts_core::search::{score_moves, self_play};
use noughts_core::{choose_move, Board, MoveScore, Player, Position, ScoreTally, SearchError};
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

/// Engine analysis of one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestMoveReport {
    /// Board in compact form.
    pub board: String,
    /// Mark the engine plays.
    pub player: Player,
    /// Chosen cell index.
    pub choice: usize,
    /// Root minimax value of every empty cell.
    pub scores: Vec<MoveScore>,
}

impl BestMoveReport {
    /// Runs the engine on `board` for `player`.
    #[instrument(skip(board), fields(board = %board.compact()))]
    pub fn analyse(board: &Board, player: Player) -> Result<Self, SearchError> {
        let scores = score_moves(board, player)?;
        let choice = choose_move(board, player)?;
        Ok(Self {
            board: board.compact(),
            player,
            choice,
            scores,
        })
    }
}

impl fmt::Display for BestMoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = Position::from_index(self.choice).map_or("?", Position::label);
        writeln!(f, "{} plays cell {} ({})", self.player, self.choice, label)?;
        for MoveScore { index, score } in &self.scores {
            let marker = if *index == self.choice { " <" } else { "" };
            writeln!(f, "  cell {}: {:+}{}", index, score, marker)?;
        }
        Ok(())
    }
}

/// One engine-versus-engine round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelfPlayRound {
    /// Starter of the round.
    pub starter: Player,
    /// Final status.
    pub status: noughts_core::GameStatus,
    /// Moves played.
    pub moves: usize,
}

/// Plays `rounds` engine-versus-engine rounds, alternating the starter.
#[instrument]
pub fn run_self_play(rounds: u32, first: Player) -> Result<(Vec<SelfPlayRound>, ScoreTally), SearchError> {
    let mut tally = ScoreTally::new();
    let mut results = Vec::with_capacity(rounds as usize);
    let mut starter = first;

    for round in 1..=rounds {
        let game = self_play(starter)?;
        tally.record(*game.status());
        info!(round, %starter, status = %game.status(), "Self-play round finished");
        results.push(SelfPlayRound {
            starter,
            status: *game.status(),
            moves: game.history().len(),
        });
        starter = starter.opponent();
    }

    Ok((results, tally))
}
