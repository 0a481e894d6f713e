//! Application state and logic.

use super::input::{action_for_key, move_cursor, Action};
use crate::session::{EngineTicket, OpponentMode, Session, SessionError, SessionSettings};
use crossterm::event::KeyCode;
use noughts_core::{GameStatus, Player, Position};
use tracing::{debug, warn};

/// Main application state.
pub struct App {
    session: Session,
    cursor: Position,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            session: Session::new(settings),
            cursor: Position::Center,
            message: None,
            should_quit: false,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press. Rejected moves only change the status line.
    pub fn handle_key(&mut self, key: KeyCode) {
        let Some(action) = action_for_key(key) else {
            return;
        };
        debug!(?action, "Handling key");

        match action {
            Action::Select(position) => self.select(position),
            Action::SelectCursor => self.select(self.cursor),
            Action::MoveCursor(key) => self.cursor = move_cursor(self.cursor, key),
            Action::ResetRound => {
                self.session.reset_round();
                self.message = None;
            }
            Action::ResetScores => {
                self.session.reset_scores();
                self.message = Some("Scores cleared".to_string());
            }
            Action::ToggleMode => {
                let mode = self.session.mode().toggled();
                self.session.set_opponent_mode(mode);
                self.message = Some(format!("Opponent: {}", mode));
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn select(&mut self, position: Position) {
        self.cursor = position;
        match self.session.select_cell(position.index()) {
            Ok(_) => self.message = None,
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.message = Some(e.to_string());
            }
        }
    }

    /// Locks input for an engine turn if the computer is to move.
    pub fn start_engine_turn(&mut self) -> Option<EngineTicket> {
        if !self.session.needs_engine_move() {
            return None;
        }
        match self.session.begin_engine_turn() {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                warn!(error = %e, "Could not start engine turn");
                None
            }
        }
    }

    /// Applies the engine move for `ticket`. Search failures are fatal.
    pub fn finish_engine_turn(&mut self, ticket: EngineTicket) -> Result<(), SessionError> {
        if let Some(engine_move) = self.session.finish_engine_turn(ticket)? {
            if let Some(position) = Position::from_index(engine_move.index) {
                self.message = Some(format!("{} played {}", engine_move.player, position.label()));
            }
        }
        Ok(())
    }

    fn player_name(&self, player: Player) -> &'static str {
        if self.session.is_computer(player) {
            "computer"
        } else {
            "human"
        }
    }

    /// Text for the status line.
    pub fn status_line(&self) -> String {
        let game = self.session.game();
        match game.status() {
            GameStatus::Won(player) => format!(
                "{} ({}) wins! Press 'r' for a new round.",
                player,
                self.player_name(*player)
            ),
            GameStatus::Draw => "Draw! Press 'r' for a new round.".to_string(),
            GameStatus::InProgress if *self.session.engine_busy() => {
                format!("Computer ({}) is thinking...", game.turn())
            }
            GameStatus::InProgress => match &self.message {
                Some(message) => format!("{}. {} to move.", message, game.turn()),
                None => format!("{} ({}) to move.", game.turn(), self.player_name(*game.turn())),
            },
        }
    }

    /// Label for the current opponent mode.
    pub fn mode_line(&self) -> String {
        match self.session.mode() {
            OpponentMode::Human => "Mode: human vs human".to_string(),
            OpponentMode::Computer => format!("Mode: human vs computer ({})", self.session.computer_mark()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_app() -> App {
        App::new(SessionSettings {
            opponent: OpponentMode::Human,
            ..SessionSettings::default()
        })
    }

    #[test]
    fn test_digit_places_mark() {
        let mut app = human_app();
        app.handle_key(KeyCode::Char('5'));
        assert_eq!(app.session().game().history().len(), 1);
        assert_eq!(app.cursor(), Position::Center);
        assert_eq!(app.status_line(), "O (human) to move.");
    }

    #[test]
    fn test_occupied_cell_sets_message() {
        let mut app = human_app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session().game().history().len(), 1);
        assert!(app.status_line().contains("occupied"));
    }

    #[test]
    fn test_engine_turn_round_trip() {
        let mut app = App::new(SessionSettings::default());
        assert!(app.start_engine_turn().is_none());
        app.handle_key(KeyCode::Char('1'));

        let ticket = app.start_engine_turn().unwrap();
        assert!(app.status_line().contains("thinking"));
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.session().game().history().len(), 1);

        app.finish_engine_turn(ticket).unwrap();
        assert_eq!(app.session().game().history().len(), 2);
        assert!(!*app.session().engine_busy());
    }

    #[test]
    fn test_toggle_mode_and_quit() {
        let mut app = App::new(SessionSettings::default());
        app.handle_key(KeyCode::Char('m'));
        assert_eq!(*app.session().mode(), OpponentMode::Human);
        assert_eq!(app.mode_line(), "Mode: human vs human");
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
