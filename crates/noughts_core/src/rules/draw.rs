//! Draw detection.

use super::win::check_winner;
use crate::Board;

/// A draw is a full board on which neither mark owns a line.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}
