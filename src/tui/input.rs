//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;
use noughts_core::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place a mark on the given cell.
    Select(Position),
    /// Place a mark under the cursor.
    SelectCursor,
    /// Move the cursor.
    MoveCursor(KeyCode),
    /// Start a new round.
    ResetRound,
    /// Clear the tally and start a new round.
    ResetScores,
    /// Switch between human and computer opponent.
    ToggleMode,
    /// Leave the app.
    Quit,
}

/// Maps a key to an action. Unbound keys return `None`.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|digit| Position::from_index(digit as usize - 1))
            .map(Action::Select),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectCursor),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Action::MoveCursor(key)),
        KeyCode::Char('r') => Some(Action::ResetRound),
        KeyCode::Char('s') => Some(Action::ResetScores),
        KeyCode::Char('m') => Some(Action::ToggleMode),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys. Stops at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|row| (row, column)),
        KeyCode::Down => Some((row + 1, column)),
        KeyCode::Left => column.checked_sub(1).map(|column| (row, column)),
        KeyCode::Right => Some((row, column + 1)),
        _ => None,
    };

    target
        .and_then(|(row, column)| Position::from_row_column(row, column))
        .unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_select_cells() {
        assert_eq!(action_for_key(KeyCode::Char('1')), Some(Action::Select(Position::TopLeft)));
        assert_eq!(action_for_key(KeyCode::Char('9')), Some(Action::Select(Position::BottomRight)));
        assert_eq!(action_for_key(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(action_for_key(KeyCode::Char('r')), Some(Action::ResetRound));
        assert_eq!(action_for_key(KeyCode::Char('s')), Some(Action::ResetScores));
        assert_eq!(action_for_key(KeyCode::Char('m')), Some(Action::ToggleMode));
        assert_eq!(action_for_key(KeyCode::Char(' ')), Some(Action::SelectCursor));
        assert_eq!(action_for_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::BottomLeft, KeyCode::Left), Position::BottomLeft);
        assert_eq!(move_cursor(Position::TopRight, KeyCode::Up), Position::TopRight);
        assert_eq!(move_cursor(Position::TopRight, KeyCode::Right), Position::TopRight);
        assert_eq!(move_cursor(Position::MiddleLeft, KeyCode::Down), Position::BottomLeft);
    }
}
