//! # bot-core
//!
//! Transport-agnostic chat bot types: [`Message`], [`Handler`], error types,
//! tracing initialization and [`dispatch`], which runs one handler through its
//! phases. Used by checkers-bot and the checkers CLI.

pub mod dispatch;
pub mod error;
pub mod logger;
pub mod types;

pub use dispatch::dispatch;
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, User};
