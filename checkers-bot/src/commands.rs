//! Recognises checkers commands in chat text.

use checkers::looks_like_move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/checkers [@opponent]`: play the AI, or open a lobby for a named opponent.
    Start { opponent: Option<String> },
    /// `/join`: take the free seat of an open lobby.
    Join,
    /// `/move [game number] A3-B4`. The number picks one of the sender's games from a private chat.
    Move { game: Option<usize>, text: Option<String> },
    /// `/endcheckers`
    End,
    /// `/board`
    Board,
    /// `/rules`
    Rules,
    /// A message consisting of nothing but a move, e.g. `c6-d5`.
    BareMove(String),
}

/// Parses a message into a checkers command, `None` when it is not one.
/// A `@botname` suffix on the command word is ignored.
pub fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim();
    if looks_like_move(text) {
        return Some(Command::BareMove(text.to_string()));
    }

    let mut words = text.split_whitespace();
    let head = words.next()?.strip_prefix('/')?;
    let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match name.as_str() {
        "checkers" => Command::Start {
            opponent: args
                .first()
                .map(|a| a.trim_start_matches('@').to_string())
                .filter(|a| !a.is_empty()),
        },
        "join" => Command::Join,
        "move" => parse_move_args(&args),
        "endcheckers" => Command::End,
        "board" => Command::Board,
        "rules" => Command::Rules,
        _ => return None,
    };
    Some(command)
}

fn parse_move_args(args: &[&str]) -> Command {
    match args {
        [] => Command::Move { game: None, text: None },
        [number, rest @ ..] if !rest.is_empty() && number.parse::<usize>().is_ok() => Command::Move {
            game: number.parse().ok(),
            text: Some(rest.join(" ")),
        },
        _ => Command::Move {
            game: None,
            text: Some(args.join(" ")),
        },
    }
}
