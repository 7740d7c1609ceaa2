use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,
}

pub type Result<T> = std::result::Result<T, BotError>;
