//! Long-lived session controller.
//!
//! A [`Session`] lives from program start until exit. It owns the current
//! round, the score tally, the opponent mode and the flag that locks human
//! input while the computer is choosing its move. Scores survive
//! [`Session::reset_round`] and are cleared only by [`Session::reset_scores`].

use derive_getters::Getters;
use noughts_core::{choose_move, GameState, GameStatus, MoveError, Player, ScoreTally, SearchError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who plays against the first human.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum OpponentMode {
    /// Two humans share the keyboard.
    #[display("human")]
    Human,
    /// The engine plays `computer_mark`.
    #[display("computer")]
    Computer,
}

impl OpponentMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            OpponentMode::Human => OpponentMode::Computer,
            OpponentMode::Computer => OpponentMode::Human,
        }
    }
}

/// Initial values for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Opponent mode at start.
    pub opponent: OpponentMode,
    /// Mark the engine plays in computer mode.
    pub computer_mark: Player,
    /// Starter of the first round.
    pub first_player: Player,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            opponent: OpponentMode::Computer,
            computer_mark: Player::O,
            first_player: Player::X,
        }
    }
}

/// Proof that an engine turn was started in a particular round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTicket {
    round: u64,
}

/// A move the engine has applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineMove {
    /// Mark that was placed.
    pub player: Player,
    /// Cell it was placed on.
    pub index: usize,
    /// Round status after the move.
    pub status: GameStatus,
}

/// Errors from session actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The round rejected the move.
    #[display("{}", _0)]
    Move(MoveError),

    /// The engine could not choose a move.
    #[display("{}", _0)]
    Search(SearchError),

    /// Input is locked while the engine is thinking.
    #[display("The computer is thinking")]
    EngineBusy,

    /// It is the computer's turn.
    #[display("It is not a human player's turn")]
    NotHumanTurn,

    /// The engine was asked to move when it does not own the turn.
    #[display("It is not the computer's turn")]
    NotEngineTurn,
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(err) => Some(err),
            SessionError::Search(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<SearchError> for SessionError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

/// Session state shared by every round.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// The current round.
    game: GameState,
    /// Outcomes of finished rounds.
    scores: ScoreTally,
    /// Current opponent mode.
    mode: OpponentMode,
    /// Mark the engine plays.
    computer_mark: Player,
    /// Starter of the current round.
    starting_player: Player,
    /// Set between `begin_engine_turn` and `finish_engine_turn`.
    engine_busy: bool,
    /// Incremented on every reset.
    round: u64,
}

impl Session {
    /// Starts a session with an empty board and a zero tally.
    #[instrument]
    pub fn new(settings: SessionSettings) -> Self {
        info!(
            mode = %settings.opponent,
            computer = %settings.computer_mark,
            first = %settings.first_player,
            "Session started"
        );
        Self {
            game: GameState::new(settings.first_player),
            scores: ScoreTally::new(),
            mode: settings.opponent,
            computer_mark: settings.computer_mark,
            starting_player: settings.first_player,
            engine_busy: false,
            round: 0,
        }
    }

    /// Whether `player` is driven by the engine under the current mode.
    pub fn is_computer(&self, player: Player) -> bool {
        self.mode == OpponentMode::Computer && player == self.computer_mark
    }

    /// True when the engine should be started for the current position.
    pub fn needs_engine_move(&self) -> bool {
        !self.engine_busy && !self.game.is_over() && self.is_computer(*self.game.turn())
    }

    /// Places the human player's mark on `index`.
    #[instrument(skip(self), fields(turn = %self.game.turn()))]
    pub fn select_cell(&mut self, index: usize) -> Result<GameStatus, SessionError> {
        if self.engine_busy {
            debug!("Input locked while engine thinks");
            return Err(SessionError::EngineBusy);
        }
        if !self.game.is_over() && self.is_computer(*self.game.turn()) {
            return Err(SessionError::NotHumanTurn);
        }
        self.apply(index)
    }

    /// Locks input and hands the turn to the engine.
    #[instrument(skip(self))]
    pub fn begin_engine_turn(&mut self) -> Result<EngineTicket, SessionError> {
        if self.engine_busy {
            return Err(SessionError::EngineBusy);
        }
        if self.game.is_over() || !self.is_computer(*self.game.turn()) {
            return Err(SessionError::NotEngineTurn);
        }
        self.engine_busy = true;
        debug!(round = self.round, "Engine turn started");
        Ok(EngineTicket { round: self.round })
    }

    /// Chooses and applies the engine's move, then unlocks input.
    ///
    /// Returns `Ok(None)` if the round was reset after `ticket` was issued.
    #[instrument(skip(self))]
    pub fn finish_engine_turn(&mut self, ticket: EngineTicket) -> Result<Option<EngineMove>, SessionError> {
        if ticket.round != self.round {
            debug!(ticket = ticket.round, round = self.round, "Dropping stale engine ticket");
            return Ok(None);
        }
        if !self.engine_busy {
            return Err(SessionError::NotEngineTurn);
        }
        self.engine_busy = false;

        let player = *self.game.turn();
        let index = choose_move(self.game.board(), player)?;
        let status = self.apply(index)?;
        info!(%player, index, %status, "Engine moved");
        Ok(Some(EngineMove { player, index, status }))
    }

    /// Runs both engine phases without a delay.
    #[instrument(skip(self))]
    pub fn play_engine_turn(&mut self) -> Result<Option<EngineMove>, SessionError> {
        let ticket = self.begin_engine_turn()?;
        self.finish_engine_turn(ticket)
    }

    /// Clears the board and starts a new round. Scores are kept.
    ///
    /// In computer mode the starter alternates with the previous round's.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        if self.mode == OpponentMode::Computer {
            self.starting_player = self.starting_player.opponent();
        }
        if self.engine_busy {
            warn!("Round reset while engine was thinking");
        }
        self.engine_busy = false;
        self.round += 1;
        self.game.reset(self.starting_player);
        info!(round = self.round, starter = %self.starting_player, "Round reset");
    }

    /// Zeroes the tally and starts a new round.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores.reset();
        self.reset_round();
    }

    /// Switches opponent mode and starts a new round. Scores are kept.
    #[instrument(skip(self))]
    pub fn set_opponent_mode(&mut self, mode: OpponentMode) {
        info!(from = %self.mode, to = %mode, "Opponent mode changed");
        self.mode = mode;
        self.reset_round();
    }

    fn apply(&mut self, index: usize) -> Result<GameStatus, SessionError> {
        let status = self.game.apply_move(index)?;
        if self.scores.record(status) {
            info!(%status, scores = ?self.scores, "Round finished");
        }
        Ok(status)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
