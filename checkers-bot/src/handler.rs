//! [`Handler`] that runs checkers games inside chats.

use async_trait::async_trait;
use bot_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use checkers::{CheckersError, Game, GameState, RandomSelector};
use tracing::{debug, info, instrument, warn};

use crate::commands::{parse_command, Command};
use crate::config::BotConfig;
use crate::replies;
use crate::sessions::{GameSessions, SessionError};

/// Routes checkers commands and bare moves to the games in a [`GameSessions`] store.
/// Other text is ignored.
pub struct CheckersHandler {
    sessions: GameSessions,
    ai_seed: Option<u64>,
}

impl CheckersHandler {
    pub fn new(sessions: GameSessions, config: &BotConfig) -> Self {
        Self {
            sessions,
            ai_seed: config.ai_seed,
        }
    }

    pub fn sessions(&self) -> &GameSessions {
        &self.sessions
    }

    fn ai_game(&self, player: i64) -> Game {
        let selector = match self.ai_seed {
            Some(seed) => RandomSelector::seeded(seed),
            None => RandomSelector::new(),
        };
        Game::with_selector(player, None, Box::new(selector))
    }

    async fn start(&self, message: &Message, opponent: Option<String>) -> String {
        let name = message.user.display_name();
        let chat_id = message.chat.id;
        let game = match &opponent {
            Some(_) => Game::open(message.user.id),
            None => self.ai_game(message.user.id),
        };

        match self.sessions.start(chat_id, game).await {
            Ok(()) => {}
            Err(SessionError::AlreadyActive(_)) => return replies::ALREADY_ACTIVE.to_string(),
            Err(e @ SessionError::LimitReached(_)) => {
                warn!(chat_id, error = %e, "Refusing new checkers game");
                return replies::TOO_MANY_GAMES.to_string();
            }
        }

        match opponent {
            Some(opponent) => replies::lobby_opened(&name, &opponent),
            None => self
                .sessions
                .with_game(chat_id, |game| replies::started_against_ai(&name, game))
                .await
                .unwrap_or_else(|| replies::NO_GAME.to_string()),
        }
    }

    async fn join(&self, message: &Message) -> String {
        let name = message.user.display_name();
        let user_id = message.user.id;
        self.sessions
            .with_game(message.chat.id, |game| match game.join(user_id) {
                Ok(()) => replies::joined(&name, game),
                Err(CheckersError::CannotJoinOwnGame) => replies::OWN_GAME.to_string(),
                Err(_) => replies::SEAT_TAKEN.to_string(),
            })
            .await
            .unwrap_or_else(|| replies::NO_GAME.to_string())
    }

    /// Plays `text` in the game of `chat_id` on behalf of `user_id`. `None` if the chat has no game.
    async fn play_in(&self, chat_id: i64, user_id: i64, text: &str) -> Option<String> {
        self.sessions
            .with_game(chat_id, |game| {
                match game.state() {
                    GameState::GameOver => return replies::game_over(game),
                    GameState::WaitingForPlayer => return replies::LOBBY_OPEN.to_string(),
                    GameState::WaitingForMove => {}
                }
                if !game.is_players_turn(user_id) {
                    return replies::NOT_YOUR_TURN.to_string();
                }
                match game.play(text) {
                    Ok(report) => {
                        info!(
                            chat_id,
                            user_id,
                            mv = %report.played,
                            ai_moves = report.ai_moves.len(),
                            state = ?game.state(),
                            "step: checkers move played"
                        );
                        replies::move_played(game, &report)
                    }
                    Err(CheckersError::MalformedMoveText(_)) => replies::BAD_FORMAT.to_string(),
                    Err(CheckersError::InvalidMove(mv)) => {
                        debug!(chat_id, user_id, mv = %mv, "Illegal checkers move");
                        replies::ILLEGAL_MOVE.to_string()
                    }
                    Err(e) => {
                        warn!(chat_id, user_id, error = %e, "Checkers move refused");
                        game.status()
                    }
                }
            })
            .await
    }

    /// `/move`, with an optional game number picking among the sender's games.
    async fn move_command(
        &self,
        message: &Message,
        game: Option<usize>,
        text: Option<String>,
    ) -> String {
        let Some(text) = text else {
            return replies::MISSING_MOVE.to_string();
        };

        if let Some(number) = game {
            let games = self.sessions.games_for_player(message.user.id).await;
            let Some(target) = number.checked_sub(1).and_then(|i| games.get(i)) else {
                return if games.is_empty() {
                    replies::NO_PLAYER_GAMES.to_string()
                } else {
                    replies::choose_game(&games)
                };
            };
            return self
                .play_in(target.chat_id, message.user.id, &text)
                .await
                .unwrap_or_else(|| replies::NO_GAME.to_string());
        }

        match self.route_move(message, &text).await {
            Some(reply) => reply,
            None => replies::NO_GAME.to_string(),
        }
    }

    /// Plays in the current chat's game, or, from a private chat, in the
    /// sender's only game elsewhere. `None` when a group chat has no game.
    async fn route_move(&self, message: &Message, text: &str) -> Option<String> {
        if let Some(reply) = self.play_in(message.chat.id, message.user.id, text).await {
            return Some(reply);
        }
        if !message.chat.is_private() {
            return None;
        }

        let games = self.sessions.games_for_player(message.user.id).await;
        match games.as_slice() {
            [] => Some(replies::NO_PLAYER_GAMES.to_string()),
            [only] => Some(
                self.play_in(only.chat_id, message.user.id, text)
                    .await
                    .unwrap_or_else(|| replies::NO_GAME.to_string()),
            ),
            _ => Some(replies::choose_game(&games)),
        }
    }

    async fn end(&self, chat_id: i64) -> String {
        if self.sessions.end(chat_id).await {
            replies::ENDED.to_string()
        } else {
            "There's no active checkers game in this chat.".to_string()
        }
    }

    async fn board(&self, chat_id: i64) -> String {
        self.sessions
            .with_game(chat_id, |game| replies::board_and_status(game))
            .await
            .unwrap_or_else(|| replies::NO_GAME.to_string())
    }
}

#[async_trait]
impl Handler for CheckersHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            content = %message.content,
            "Received message"
        );
        Ok(!message.content.trim().is_empty())
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let (response_type, reply_len) = match response {
            HandlerResponse::Continue => ("Continue", None),
            HandlerResponse::Stop => ("Stop", None),
            HandlerResponse::Ignore => ("Ignore", None),
            HandlerResponse::Reply(text) => ("Reply", Some(text.len())),
        };
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            response_type = %response_type,
            reply_len = ?reply_len,
            "step: checkers reply"
        );
        Ok(())
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim().is_empty() {
            return Err(HandlerError::NoText.into());
        }

        let Some(command) = parse_command(&message.content) else {
            return Ok(HandlerResponse::Ignore);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            command = ?command,
            "step: checkers command"
        );

        let chat_id = message.chat.id;
        let reply = match command {
            Command::Start { opponent } => self.start(message, opponent).await,
            Command::Join => self.join(message).await,
            Command::Move { game, text } => self.move_command(message, game, text).await,
            Command::BareMove(text) => match self.route_move(message, &text).await {
                Some(reply) => reply,
                None => return Ok(HandlerResponse::Ignore),
            },
            Command::End => self.end(chat_id).await,
            Command::Board => self.board(chat_id).await,
            Command::Rules => replies::RULES.to_string(),
        };

        Ok(HandlerResponse::Reply(reply))
    }
}
