//! Noughts - tic-tac-toe in the terminal
//!
//! Wraps the [`noughts_core`] rules and engine with a session controller,
//! TOML configuration and a ratatui front end.
//!
//! # Example
//!
//! ```
//! use noughts::session::{OpponentMode, Session, SessionSettings};
//!
//! let mut session = Session::new(SessionSettings::default());
//! session.select_cell(4).unwrap();
//! let reply = session.play_engine_turn().unwrap().unwrap();
//! assert_ne!(reply.index, 4);
//! assert_eq!(*session.mode(), OpponentMode::Computer);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod report;
pub mod session;
pub mod tui;

pub use config::{AppConfig, ConfigError};
pub use session::{EngineMove, EngineTicket, OpponentMode, Session, SessionError, SessionSettings};
