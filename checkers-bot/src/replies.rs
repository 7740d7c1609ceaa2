//! Reply texts shown to chat users.

use checkers::{Game, MoveReport};

use crate::sessions::{ActiveGame, Opponent};

pub const RULES: &str = "♟️ CHECKERS GAME RULES & FAQ ♟️\n\n\
Basic Rules:\n\
• Pieces move diagonally on dark squares\n\
• Regular pieces can only move forward\n\
• Kings can move forward or backward\n\
• Capture by jumping over opponent pieces\n\
• Multiple jumps in one turn are allowed\n\
• Reach opponent's end to become a King\n\n\
How to Play:\n\
• Make moves using the format: A3-B4\n\
• A3 is the starting position (column A, row 3)\n\
• B4 is the destination (column B, row 4)\n\n\
FAQ:\n\
• Q: Who goes first?\n  A: White (bottom pieces) always goes first\n\
• Q: Is capturing mandatory?\n  A: No, capturing is optional in this version\n\
• Q: How do I get a King?\n  A: Reach the opposite end of the board\n\
• Q: How do I end the game?\n  A: Use /endcheckers to terminate the game";

pub const MOVE_HINT: &str = "Type a move in the format: A3-B4 (or /move A3-B4)";
pub const NO_GAME: &str = "There's no active checkers game in this chat. Start one with /checkers.";
pub const NO_PLAYER_GAMES: &str = "You don't have any active checkers games.";
pub const ALREADY_ACTIVE: &str =
    "There's already an active checkers game in this chat. Finish it or use /endcheckers to end it first.";
pub const NOT_YOUR_TURN: &str = "It's not your turn!";
pub const BAD_FORMAT: &str = "Invalid move format. Please use the format A3-B4.";
pub const ILLEGAL_MOVE: &str = "Invalid move. Please try again.";
pub const MISSING_MOVE: &str = "Please specify a move in the format: /move A3-B4";
pub const LOBBY_OPEN: &str = "Still waiting for an opponent. Send /join to take the black pieces.";
pub const TOO_MANY_GAMES: &str = "Too many checkers games are running right now. Please try again later.";
pub const ENDED: &str = "The checkers game has been ended.";
pub const OWN_GAME: &str = "You can't join your own game!";
pub const SEAT_TAKEN: &str = "Someone has already joined this game.";

pub fn board_and_status(game: &Game) -> String {
    format!("{}\n{}", game.board_text(), game.status())
}

pub fn game_over(game: &Game) -> String {
    format!(
        "This game is already over. {}\nStart a new game with /checkers.",
        game.status()
    )
}

pub fn started_against_ai(name: &str, game: &Game) -> String {
    format!(
        "{}\n\n🎮 {} has started a game of Checkers against the AI!\n\n{}\n\n{}",
        RULES,
        name,
        board_and_status(game),
        MOVE_HINT
    )
}

pub fn lobby_opened(name: &str, opponent: &str) -> String {
    format!(
        "{}\n\n🎮 {} has started a game of Checkers and is waiting for {} to join!\nSend /join to take the black pieces.",
        RULES, name, opponent
    )
}

pub fn joined(name: &str, game: &Game) -> String {
    format!(
        "🎮 {} has joined the game of Checkers!\n\n{}\n\n{}",
        name,
        board_and_status(game),
        MOVE_HINT
    )
}

pub fn move_played(game: &Game, report: &MoveReport) -> String {
    let mut text = format!(
        "🎮 Checkers Game\n\n{}\n\nLast move: {}",
        board_and_status(game),
        report.played
    );
    if !report.ai_moves.is_empty() {
        let ai: Vec<String> = report.ai_moves.iter().map(|m| m.to_string()).collect();
        text.push_str(&format!("\nAI played: {}", ai.join(", ")));
    }
    if report.continues {
        text.push_str(&format!(
            "\nAnother jump is available: {} moves again.",
            game.current_turn().name()
        ));
    }
    text
}

pub fn choose_game(games: &[ActiveGame]) -> String {
    let mut text = String::from(
        "You have multiple active games. Please specify which game you want to make a move in:\n\n",
    );
    for (i, game) in games.iter().enumerate() {
        let opponent = match game.opponent {
            Opponent::Ai => "AI".to_string(),
            Opponent::Human(id) => format!("User {}", id),
            Opponent::Pending => "nobody yet".to_string(),
        };
        text.push_str(&format!("{}. Game in chat {} against {}\n", i + 1, game.chat_id, opponent));
    }
    text.push_str("\nPlease use /move [game_number] [your_move] to make a move.");
    text
}
