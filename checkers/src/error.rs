use thiserror::Error;

use crate::board::Move;
use crate::game::GameState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    #[error("Malformed move text: {0:?}")]
    MalformedMoveText(String),

    #[error("Invalid move: {0}")]
    InvalidMove(Move),

    #[error("Game is not accepting moves (state: {0:?})")]
    NotAcceptingMoves(GameState),

    #[error("Game is not open for joining")]
    NotOpenForJoin,

    #[error("Cannot join your own game")]
    CannotJoinOwnGame,
}

pub type Result<T> = std::result::Result<T, CheckersError>;
