//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Square};
use serde::{Deserialize, Serialize};

/// The 8 index triples that win when uniformly marked.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Geometric class of a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Horizontal line, 0 at the top.
    Row(usize),
    /// Vertical line, 0 at the left.
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// A completed line and the player who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Owner of all three cells.
    pub player: Player,
    /// Offset into [`WINNING_LINES`].
    pub line: usize,
}

impl WinningLine {
    /// The three board indices of the line.
    pub fn cells(&self) -> [usize; 3] {
        WINNING_LINES[self.line]
    }

    /// Whether `index` belongs to this line.
    pub fn contains(&self, index: usize) -> bool {
        self.cells().contains(&index)
    }

    /// Classifies the line by its slot in the table.
    pub fn kind(&self) -> LineKind {
        match self.line {
            0..=2 => LineKind::Row(self.line),
            3..=5 => LineKind::Column(self.line - 3),
            6 => LineKind::Diagonal,
            _ => LineKind::AntiDiagonal,
        }
    }
}

/// Finds the first completed line on the board.
///
/// At most one player can own a line when play stops at the first win,
/// so the scan order does not matter.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES
        .iter()
        .enumerate()
        .find_map(|(line, &[a, b, c])| {
            let sq = board.get(a)?;
            match sq {
                Square::Occupied(player) if board.get(b) == Some(sq) && board.get(c) == Some(sq) => {
                    Some(WinningLine { player, line })
                }
                _ => None,
            }
        })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|line| line.player)
}
