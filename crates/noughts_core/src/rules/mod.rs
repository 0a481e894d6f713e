//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Both the game state and the
//! search engine read the same fixed line table.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{check_winner, winning_line, LineKind, WinningLine, WINNING_LINES};

use crate::{Board, GameStatus};
use tracing::instrument;

/// Classifies a board as won, drawn or still in progress.
#[instrument(level = "trace", skip(board), fields(board = %board.compact()))]
pub fn detect_outcome(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_draw(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
