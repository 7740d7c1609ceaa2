//! Integration tests for [`checkers_bot::CheckersHandler`].
//!
//! Covers: starting games against the AI and in a lobby, turn ownership, move
//! errors, routing bare moves from a private chat, ending games and game over.

use bot_core::{dispatch, BotError, Chat, Handler, HandlerError, HandlerResponse, Message, User};
use checkers::{Board, Coord, Piece, Side};
use checkers_bot::{replies, BotConfig, CheckersHandler, GameSessions};

const GROUP: i64 = -100;

fn user(id: i64, name: &str) -> User {
    User {
        id,
        username: Some(name.to_lowercase()),
        first_name: Some(name.to_string()),
    }
}

fn group_message(user_id: i64, content: &str) -> Message {
    Message::new(
        "msg",
        user(user_id, "Player"),
        Chat {
            id: GROUP,
            chat_type: "group".to_string(),
        },
        content,
    )
}

fn private_message(user_id: i64, content: &str) -> Message {
    Message::new(
        "msg",
        user(user_id, "Player"),
        Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content,
    )
}

fn handler() -> CheckersHandler {
    let config = BotConfig {
        ai_seed: Some(7),
        ..BotConfig::default()
    };
    CheckersHandler::new(GameSessions::new(config.max_games), &config)
}

async fn reply(handler: &CheckersHandler, message: Message) -> String {
    match handler.handle(&message).await.unwrap() {
        HandlerResponse::Reply(text) => text,
        other => panic!("expected a reply, got {:?}", other),
    }
}

/// **Test: /checkers without opponent starts an AI game; a second /checkers is refused.**
#[tokio::test]
async fn test_start_ai_game() {
    let h = handler();

    let text = reply(&h, group_message(1, "/checkers")).await;
    assert!(text.contains("against the AI"));
    assert!(text.contains("  A B C D E F G H"));
    assert!(text.contains("White's turn (Player 1) ⚪"));
    assert!(h.sessions().contains(GROUP).await);

    let again = reply(&h, group_message(2, "/checkers")).await;
    assert_eq!(again, replies::ALREADY_ACTIVE);
}

/// **Test: A legal move is played and answered by the AI.**
#[tokio::test]
async fn test_move_against_ai() {
    let h = handler();
    reply(&h, group_message(1, "/checkers")).await;

    let text = reply(&h, group_message(1, "/move c6-d5")).await;

    assert!(text.contains("Last move: C6-D5"));
    assert!(text.contains("AI played: "));
    let (history, turn) = h
        .sessions()
        .with_game(GROUP, |game| (game.move_history().len(), game.current_turn()))
        .await
        .unwrap();
    assert_eq!(history, 2);
    assert_eq!(turn, Side::White);
}

/// **Test: Wrong player, malformed text and illegal moves get their own replies.**
#[tokio::test]
async fn test_move_errors() {
    let h = handler();
    reply(&h, group_message(1, "/checkers")).await;

    assert_eq!(reply(&h, group_message(2, "C6-D5")).await, replies::NOT_YOUR_TURN);
    assert_eq!(reply(&h, group_message(1, "/move C6D5")).await, replies::BAD_FORMAT);
    assert_eq!(reply(&h, group_message(1, "/move A6-A5")).await, replies::ILLEGAL_MOVE);
    assert_eq!(reply(&h, group_message(1, "/move")).await, replies::MISSING_MOVE);

    let history = h
        .sessions()
        .with_game(GROUP, |game| game.move_history().len())
        .await;
    assert_eq!(history, Some(0));
}

/// **Test: Lobby flow: open, refuse moves and self-join, join, then play.**
#[tokio::test]
async fn test_lobby_and_join() {
    let h = handler();

    let text = reply(&h, group_message(1, "/checkers @bob")).await;
    assert!(text.contains("waiting for bob to join"));

    assert_eq!(reply(&h, group_message(1, "A6-B5")).await, replies::LOBBY_OPEN);
    assert_eq!(reply(&h, group_message(1, "/join")).await, replies::OWN_GAME);

    let joined = reply(&h, group_message(2, "/join")).await;
    assert!(joined.contains("has joined the game of Checkers"));
    assert_eq!(reply(&h, group_message(3, "/join")).await, replies::SEAT_TAKEN);

    assert_eq!(reply(&h, group_message(2, "A6-B5")).await, replies::NOT_YOUR_TURN);
    let played = reply(&h, group_message(1, "A6-B5")).await;
    assert!(played.contains("Black's turn (Player 2) ⚫"));
    assert!(!played.contains("AI played"));

    let black = reply(&h, group_message(2, "B3-C4")).await;
    assert!(black.contains("Last move: B3-C4"));
}

/// **Test: A bare move in a private chat goes to the sender's only game.**
#[tokio::test]
async fn test_private_chat_routing() {
    let h = handler();

    assert_eq!(reply(&h, private_message(1, "C6-D5")).await, replies::NO_PLAYER_GAMES);

    reply(&h, group_message(1, "/checkers")).await;
    let text = reply(&h, private_message(1, "C6-D5")).await;
    assert!(text.contains("Last move: C6-D5"));

    // A second game makes the target ambiguous.
    let other_group = Message::new(
        "msg",
        user(1, "Player"),
        Chat {
            id: -200,
            chat_type: "group".to_string(),
        },
        "/checkers",
    );
    reply(&h, other_group).await;

    let listing = reply(&h, private_message(1, "E6-F5")).await;
    assert!(listing.contains("You have multiple active games"));
    assert!(listing.contains("1. Game in chat -200 against AI"));
    assert!(listing.contains("2. Game in chat -100 against AI"));

    let picked = reply(&h, private_message(1, "/move 1 E6-F5")).await;
    assert!(picked.contains("Last move: E6-F5"));
    let history = h
        .sessions()
        .with_game(-200, |game| game.move_history().first().copied())
        .await
        .flatten();
    assert_eq!(history.map(|m| m.to_string()), Some("E6-F5".to_string()));
}

/// **Test: Text that is not for the checkers handler is ignored.**
#[tokio::test]
async fn test_ignores_unrelated_text() {
    let h = handler();

    let response = h.handle(&group_message(1, "good morning")).await.unwrap();
    assert_eq!(response, HandlerResponse::Ignore);

    // Bare moves in a group without a game are just chat.
    let response = h.handle(&group_message(1, "A6-B5")).await.unwrap();
    assert_eq!(response, HandlerResponse::Ignore);
}

#[tokio::test]
async fn test_empty_message_is_an_error() {
    let h = handler();
    let result = h.handle(&group_message(1, "   ")).await;
    assert!(matches!(result, Err(BotError::Handler(HandlerError::NoText))));
}

/// **Test: Dispatch stops blank messages in `before` and replies to commands.**
#[tokio::test]
async fn test_dispatch_through_handler_phases() {
    let h = handler();

    assert!(!h.before(&group_message(1, "   ")).await.unwrap());
    let response = dispatch(&h, &group_message(1, "   ")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let message = private_message(1, "/checkers");
    assert!(h.before(&message).await.unwrap());
    let response = dispatch(&h, &message).await.unwrap();
    assert!(matches!(response, HandlerResponse::Reply(_)));
    assert!(h.sessions().contains(1).await);
    assert!(h.after(&message, &response).await.is_ok());

    let response = dispatch(&h, &group_message(1, "hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Ignore);
}

#[tokio::test]
async fn test_board_rules_and_end() {
    let h = handler();

    assert_eq!(reply(&h, group_message(1, "/board")).await, replies::NO_GAME);
    assert_eq!(reply(&h, group_message(1, "/rules")).await, replies::RULES);

    reply(&h, group_message(1, "/checkers")).await;
    let board = reply(&h, group_message(1, "/board")).await;
    assert!(board.starts_with("  A B C D E F G H"));

    assert_eq!(reply(&h, group_message(1, "/endcheckers")).await, replies::ENDED);
    assert!(!h.sessions().contains(GROUP).await);
    let again = reply(&h, group_message(1, "/endcheckers")).await;
    assert!(again.contains("no active checkers game"));
}

/// **Test: Capturing the last piece ends the game; later moves are refused.**
#[tokio::test]
async fn test_game_over_reply() {
    let h = handler();
    reply(&h, group_message(1, "/checkers @bob")).await;
    reply(&h, group_message(2, "/join")).await;

    h.sessions()
        .with_game(GROUP, |game| {
            let board = game.board_mut();
            *board = Board::empty();
            board.set(Coord::new(5, 2), Piece::WhiteMan);
            board.set(Coord::new(4, 3), Piece::BlackMan);
        })
        .await
        .unwrap();

    let text = reply(&h, group_message(1, "C6-E4")).await;
    assert!(text.contains("Game over! White (Player 1) wins! 🎉"));

    let after = reply(&h, group_message(2, "/move B3-C4")).await;
    assert!(after.starts_with("This game is already over."));
}
