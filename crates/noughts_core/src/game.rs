//! Game state and move application.

use super::action::{Move, MoveError};
use super::invariants::assert_invariants;
use super::rules::detect_outcome;
use super::{Board, GameStatus, Player, CELL_COUNT};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Complete state of one round.
///
/// `status` is always what [`detect_outcome`] reports for `board`, and
/// `turn` only advances when a move is accepted while the round is in
/// progress.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move. Frozen once the round is over.
    turn: Player,
    /// Game status.
    status: GameStatus,
    /// Player who moved first this round.
    starting_player: Player,
    /// Accepted moves in order.
    history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh round with `starting_player` to move.
    #[instrument]
    pub fn new(starting_player: Player) -> Self {
        Self {
            board: Board::new(),
            turn: starting_player,
            status: GameStatus::InProgress,
            starting_player,
            history: Vec::new(),
        }
    }

    /// Places the current player's mark at `index`.
    ///
    /// On success the status is recomputed and returned; if the round is
    /// still in progress the turn passes to the opponent. On error nothing
    /// changes.
    #[instrument(skip(self), fields(turn = %self.turn, board = %self.board.compact()))]
    pub fn apply_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameAlreadyTerminal);
        }

        if index >= CELL_COUNT {
            return Err(MoveError::InvalidIndex(index));
        }

        if !self.board.is_empty(index) {
            return Err(MoveError::CellOccupied(index));
        }

        let player = self.turn;
        self.board.place(index, player);
        self.history.push(Move::new(player, index));
        self.status = detect_outcome(&self.board);

        if !self.status.is_terminal() {
            self.turn = player.opponent();
        }

        debug!(%player, index, status = %self.status, "Move applied");
        assert_invariants(self);

        Ok(self.status)
    }

    /// Clears the board for a new round.
    #[instrument(skip(self))]
    pub fn reset(&mut self, starting_player: Player) {
        *self = Self::new(starting_player);
    }

    /// Returns true once the round is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Replays `indices` from a fresh round started by `starting_player`.
    #[instrument]
    pub fn replay(starting_player: Player, indices: &[usize]) -> Result<Self, MoveError> {
        let mut game = Self::new(starting_player);
        for &index in indices {
            game.apply_move(index)?;
        }
        Ok(game)
    }

    /// Assembles a state without validation so tests can build corrupted rounds.
    #[cfg(test)]
    pub(crate) fn with_parts_for_test(
        board: Board,
        turn: Player,
        status: GameStatus,
        history: Vec<Move>,
    ) -> Self {
        let starting_player = history.first().map_or(turn, |m| m.player);
        Self {
            board,
            turn,
            status,
            starting_player,
            history,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::X)
    }
}
