//! Live games keyed by chat id.
//!
//! The store is an owned handle passed to whoever routes messages; cloning it
//! shares the same games. Every access to a game happens under the lock, so
//! one game never sees two moves at once.

use std::collections::HashMap;
use std::sync::Arc;

use checkers::{Game, GameState, PlayerId, Side};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Chat {0} already has an active game")]
    AlreadyActive(i64),

    #[error("Game limit of {0} reached")]
    LimitReached(usize),
}

/// Who sits across the board from a given player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Ai,
    Human(PlayerId),
    /// Lobby still open.
    Pending,
}

/// A game a player takes part in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGame {
    pub chat_id: i64,
    pub opponent: Opponent,
}

#[derive(Clone)]
pub struct GameSessions {
    games: Arc<Mutex<HashMap<i64, Game>>>,
    max_games: usize,
}

impl GameSessions {
    pub fn new(max_games: usize) -> Self {
        Self {
            games: Arc::new(Mutex::new(HashMap::new())),
            max_games,
        }
    }

    /// Registers a game for the chat. Fails if the chat already has one or the store is full.
    pub async fn start(&self, chat_id: i64, game: Game) -> Result<(), SessionError> {
        let mut games = self.games.lock().await;
        if games.contains_key(&chat_id) {
            return Err(SessionError::AlreadyActive(chat_id));
        }
        if games.len() >= self.max_games {
            return Err(SessionError::LimitReached(self.max_games));
        }
        info!(
            chat_id,
            player1 = game.player1(),
            ai = game.has_ai_opponent(),
            "step: checkers session started"
        );
        games.insert(chat_id, game);
        Ok(())
    }

    /// Drops the chat's game. Returns whether there was one.
    pub async fn end(&self, chat_id: i64) -> bool {
        let removed = self.games.lock().await.remove(&chat_id).is_some();
        if removed {
            info!(chat_id, "step: checkers session ended");
        }
        removed
    }

    pub async fn contains(&self, chat_id: i64) -> bool {
        self.games.lock().await.contains_key(&chat_id)
    }

    /// Runs `f` against the chat's game while holding the lock.
    pub async fn with_game<R>(&self, chat_id: i64, f: impl FnOnce(&mut Game) -> R) -> Option<R> {
        let mut games = self.games.lock().await;
        games.get_mut(&chat_id).map(f)
    }

    /// Games `player` sits in, ordered by chat id.
    pub async fn games_for_player(&self, player: PlayerId) -> Vec<ActiveGame> {
        let games = self.games.lock().await;
        let mut found: Vec<ActiveGame> = games
            .iter()
            .filter(|(_, game)| game.is_player(player))
            .map(|(&chat_id, game)| ActiveGame {
                chat_id,
                opponent: opponent_of(game, player),
            })
            .collect();
        found.sort_by_key(|g| g.chat_id);
        found
    }

    pub async fn len(&self) -> usize {
        self.games.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn opponent_of(game: &Game, player: PlayerId) -> Opponent {
    if game.state() == GameState::WaitingForPlayer {
        return Opponent::Pending;
    }
    let other = match game.side_of(player) {
        Some(Side::White) => game.player2(),
        _ => Some(game.player1()),
    };
    match other {
        Some(id) => Opponent::Human(id),
        None => Opponent::Ai,
    }
}
