//! # checkers-bot
//!
//! Chat front end for the checkers engine: an owned store of live games keyed
//! by chat, command parsing, and [`CheckersHandler`] which turns messages into
//! moves and replies.

pub mod commands;
pub mod config;
pub mod handler;
pub mod replies;
pub mod sessions;

pub use commands::{parse_command, Command};
pub use config::BotConfig;
pub use handler::CheckersHandler;
pub use sessions::{ActiveGame, GameSessions, Opponent, SessionError};
