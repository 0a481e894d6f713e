//! Moves and move rejection.

use super::Player;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The board index (0-8) where the mark is placed.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.index)
    }
}

/// Reason a move was rejected.
///
/// A rejected move leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is outside 0-8.
    #[display("Index {} is out of bounds (must be 0-8)", _0)]
    InvalidIndex(usize),

    /// The square at the index is already occupied.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(usize),

    /// The game is already won or drawn.
    #[display("Game is already over")]
    GameAlreadyTerminal,
}

impl std::error::Error for MoveError {}
