//! Pure tic-tac-toe game logic with a perfect-play search engine.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`GameState`] and the [`rules`] that classify
//!   a board as won, drawn or in progress.
//! - **Search engine**: [`search::choose_move`] runs exhaustive minimax over
//!   the remaining game tree.
//! - **Score tally**: [`ScoreTally`] counts finished rounds.
//!
//! # Example
//!
//! ```
//! use noughts_core::{search, GameState, GameStatus, Player};
//!
//! let mut game = GameState::new(Player::X);
//! game.apply_move(0)?;
//! let reply = search::choose_move(game.board(), Player::O)?;
//! assert_eq!(game.apply_move(reply)?, GameStatus::InProgress);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod score;
pub mod search;
mod types;

pub use action::{Move, MoveError};
pub use game::GameState;
pub use position::Position;
pub use rules::{detect_outcome, winning_line, LineKind, WinningLine, WINNING_LINES};
pub use score::ScoreTally;
pub use search::{choose_move, MoveScore, SearchError};
pub use types::{Board, BoardParseError, GameStatus, Player, PlayerParseError, Square, CELL_COUNT};
