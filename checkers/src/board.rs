//! 8x8 board, coordinates and moves.
//!
//! Row 0 is the top of the board (Black's home rows are 0-2, White's are 5-7).
//! Pieces stand on squares where `(row + col) % 2 == 1`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Piece, Side};

pub const BOARD_SIZE: usize = 8;

const COLUMN_LETTERS: [char; BOARD_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Zero-based (row, col) cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Neighbour `(dr, dc)` away, or `None` when it would leave the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let coord = Coord::new(row, col);
        coord.in_bounds().then_some(coord)
    }

    /// Squares that hold pieces; the other half of the board is never used.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// Same notation the move parser accepts: column letter then 1-based row.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COLUMN_LETTERS.get(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// A single diagonal step (distance 1) or jump (distance 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: impl Into<Coord>, to: impl Into<Coord>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Row distance travelled.
    pub fn distance(&self) -> usize {
        self.from.row.abs_diff(self.to.row)
    }

    pub fn is_jump(&self) -> bool {
        self.distance() == 2
    }

    /// Square jumped over, for jumps only.
    pub fn captured(&self) -> Option<Coord> {
        self.is_jump().then(|| {
            Coord::new(
                (self.from.row + self.to.row) / 2,
                (self.from.col + self.to.col) / 2,
            )
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Piece; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Board with no pieces at all, for composing test positions.
    pub fn empty() -> Self {
        Self {
            cells: [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Starting position: twelve men per side on the playable squares of the three home rows.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let piece = match row {
                0..=2 => Piece::BlackMan,
                5..=7 => Piece::WhiteMan,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                let coord = Coord::new(row, col);
                if coord.is_playable() {
                    board.set(coord, piece);
                }
            }
        }
        board
    }

    /// Cell content; off-board coordinates read as empty.
    pub fn get(&self, coord: Coord) -> Piece {
        if coord.in_bounds() {
            self.cells[coord.row][coord.col]
        } else {
            Piece::Empty
        }
    }

    /// Replaces the cell content. Off-board writes are ignored.
    pub fn set(&mut self, coord: Coord, piece: Piece) {
        if coord.in_bounds() {
            self.cells[coord.row][coord.col] = piece;
        }
    }

    /// Clears the cell and returns what was there.
    pub fn take(&mut self, coord: Coord) -> Piece {
        let piece = self.get(coord);
        self.set(coord, Piece::Empty);
        piece
    }

    /// Number of men and kings of `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|piece| piece.belongs_to(side))
            .count()
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, piece)| !piece.is_empty())
                .map(move |(col, piece)| (Coord::new(row, col), *piece))
        })
    }

    /// Text grid with column letters on top and 1-based row numbers on the left.
    pub fn render(&self) -> String {
        let mut out = String::from("  A B C D E F G H\n");
        for (row, cells) in self.cells.iter().enumerate() {
            out.push_str(&format!("{} ", row + 1));
            for (col, piece) in cells.iter().enumerate() {
                let glyph = piece.glyph().unwrap_or(if Coord::new(row, col).is_playable() {
                    "⬛"
                } else {
                    "⬜"
                });
                out.push_str(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
