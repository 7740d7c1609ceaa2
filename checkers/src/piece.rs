//! Sides and board cell values.

use serde::{Deserialize, Serialize};

/// One of the two colours. White moves first and sits at the bottom (rows 5-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta a man of this side moves along.
    pub fn forward(self) -> isize {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row on which a man of this side is crowned.
    pub fn promotion_row(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    pub fn man(self) -> Piece {
        match self {
            Side::White => Piece::WhiteMan,
            Side::Black => Piece::BlackMan,
        }
    }

    pub fn king(self) -> Piece {
        match self {
            Side::White => Piece::WhiteKing,
            Side::Black => Piece::BlackKing,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    WhiteMan,
    BlackMan,
    WhiteKing,
    BlackKing,
}

impl Piece {
    pub fn side(self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::WhiteMan | Piece::WhiteKing => Some(Side::White),
            Piece::BlackMan | Piece::BlackKing => Some(Side::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// Crowned version of a man; kings and empty cells are returned unchanged.
    pub fn promote(self) -> Piece {
        match self {
            Piece::WhiteMan => Piece::WhiteKing,
            Piece::BlackMan => Piece::BlackKing,
            other => other,
        }
    }

    /// Diagonal directions this piece may travel in, as (row, col) deltas.
    pub fn directions(self) -> &'static [(isize, isize)] {
        const WHITE_MAN: [(isize, isize); 2] = [(-1, -1), (-1, 1)];
        const BLACK_MAN: [(isize, isize); 2] = [(1, -1), (1, 1)];
        const KING: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
        match self {
            Piece::Empty => &[],
            Piece::WhiteMan => &WHITE_MAN,
            Piece::BlackMan => &BLACK_MAN,
            Piece::WhiteKing | Piece::BlackKing => &KING,
        }
    }

    /// Display glyph for an occupied cell. Empty cells depend on square colour, see [`crate::board::Board::render`].
    pub fn glyph(self) -> Option<&'static str> {
        match self {
            Piece::Empty => None,
            Piece::WhiteMan => Some("⚪"),
            Piece::BlackMan => Some("⚫"),
            Piece::WhiteKing => Some("👑⚪"),
            Piece::BlackKing => Some("👑⚫"),
        }
    }
}
