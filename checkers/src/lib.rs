//! # checkers
//!
//! Checkers engine for one game on an 8x8 board: move legality, jumps with
//! forced continuation, promotion, game-over detection and a random AI seat.
//! Synchronous and free of I/O; the caller owns each [`Game`] and serialises
//! access to it.

pub mod board;
pub mod error;
pub mod game;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod selector;

pub use board::{Board, Coord, Move, BOARD_SIZE};
pub use error::{CheckersError, Result};
pub use game::{Game, GameSnapshot, GameState, MoveReport, PlayerId};
pub use notation::{looks_like_move, parse_move, parse_square};
pub use piece::{Piece, Side};
pub use rules::{is_valid_move, jumps_from, possible_moves};
pub use selector::{MoveSelector, RandomSelector, ScriptedSelector};
