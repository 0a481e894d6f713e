//! Outcome consistency invariant: the stored status matches the board.

use super::Invariant;
use crate::GameState;
use crate::rules::detect_outcome;

/// Invariant: `status` is exactly what the rules report for the board.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        *game.status() == detect_outcome(game.board())
    }

    fn description() -> &'static str {
        "Game status agrees with the board"
    }
}
