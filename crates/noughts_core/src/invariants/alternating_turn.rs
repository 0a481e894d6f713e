//! Alternating turn invariant: the starting player moves first, then turns alternate.

use super::Invariant;
use crate::GameState;

/// Invariant: Players alternate turns.
///
/// The first recorded move belongs to the round's starting player, no
/// player moves twice in a row, and while the round is in progress the
/// player to move is the opponent of the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();

        let Some(first) = history.first() else {
            return game.turn() == game.starting_player();
        };

        if first.player != *game.starting_player() {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        if game.is_over() {
            return true;
        }

        history
            .last()
            .is_some_and(|last| last.player.opponent() == *game.turn())
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the round's first player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStatus, Move, Player};

    #[test]
    fn test_fresh_round_holds() {
        assert!(AlternatingTurnInvariant::holds(&GameState::new(Player::O)));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let game = GameState::replay(Player::O, &[0, 4, 8, 2, 6]).unwrap();
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_same_player_twice_violates() {
        let game = GameState::replay(Player::X, &[0, 4]).unwrap();
        let history = vec![Move::new(Player::X, 0), Move::new(Player::X, 4)];
        let game = GameState::with_parts_for_test(*game.board(), Player::O, GameStatus::InProgress, history);
        assert!(!AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_stale_turn_violates() {
        let game = GameState::replay(Player::X, &[0]).unwrap();
        let stale = GameState::with_parts_for_test(
            *game.board(),
            Player::X,
            GameStatus::InProgress,
            game.history().to_vec(),
        );
        assert!(!AlternatingTurnInvariant::holds(&stale));
    }
}
