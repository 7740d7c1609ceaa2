//! Text notation for moves: `A3-B4`, column letter then 1-based row.

use crate::board::{Coord, Move};

/// Parses `"<col><row>-<col><row>"` into a move. Column letters are
/// case-insensitive and spaces are ignored. Returns `None` for anything that
/// is not exactly two squares separated by one hyphen, or that lands off the board.
pub fn parse_move(text: &str) -> Option<Move> {
    let compact: String = text.chars().filter(|c| *c != ' ').collect();
    let mut parts = compact.split('-');
    let from = parse_square(parts.next()?)?;
    let to = parse_square(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Move { from, to })
}

/// Parses a single square such as `c6`.
pub fn parse_square(text: &str) -> Option<Coord> {
    let mut chars = text.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    let col = (letter as usize).checked_sub('A' as usize)?;
    let row = (digit as usize).checked_sub(1)?;
    let coord = Coord::new(row, col);
    coord.in_bounds().then_some(coord)
}

/// Whether a whole chat message is a bare move such as `a3-b4` (no spaces,
/// letters A-H, rows 1-8). Used to pick moves out of free text.
pub fn looks_like_move(text: &str) -> bool {
    let bytes = text.trim().as_bytes();
    let square = |b: &[u8]| {
        matches!(b[0].to_ascii_uppercase(), b'A'..=b'H') && matches!(b[1], b'1'..=b'8')
    };
    bytes.len() == 5 && bytes[2] == b'-' && square(&bytes[0..2]) && square(&bytes[3..5])
}
