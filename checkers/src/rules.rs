//! Move legality and legal-move enumeration.
//!
//! Captures are optional here: a simple move is legal even when a jump is
//! available. Only the AI prefers jumps, see [`crate::game::Game::make_ai_move`].

use crate::board::{Board, Coord, Move};
use crate::piece::Side;

/// Whether `side` may move the piece on `from` to `to` on this board.
///
/// Checks, in order: both squares on the board, `from` holds a piece of
/// `side`, `to` is empty, the move is diagonal, men only go forward, and the
/// distance is one square or a two-square jump over an opposing piece.
pub fn is_valid_move(board: &Board, side: Side, from: Coord, to: Coord) -> bool {
    if !from.in_bounds() || !to.in_bounds() {
        return false;
    }

    let piece = board.get(from);
    if !piece.belongs_to(side) {
        return false;
    }

    if !board.get(to).is_empty() {
        return false;
    }

    let row_delta = to.row.abs_diff(from.row);
    if row_delta != to.col.abs_diff(from.col) {
        return false;
    }

    if !piece.is_king() {
        let moving_up = to.row < from.row;
        let forward_is_up = side.forward() < 0;
        if moving_up != forward_is_up {
            return false;
        }
    }

    match row_delta {
        1 => true,
        2 => Move::new(from, to)
            .captured()
            .is_some_and(|mid| board.get(mid).belongs_to(side.opponent())),
        _ => false,
    }
}

/// All legal moves for `side`, scanning the board row-major and each piece's
/// directions in order. Per piece, simple steps come before jumps.
pub fn possible_moves(board: &Board, side: Side, jumps_only: bool) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces() {
        if !piece.belongs_to(side) {
            continue;
        }
        if !jumps_only {
            moves.extend(
                piece
                    .directions()
                    .iter()
                    .filter_map(|&(dr, dc)| from.offset(dr, dc))
                    .filter(|&to| board.get(to).is_empty())
                    .map(|to| Move::new(from, to)),
            );
        }
        moves.extend(jumps_from(board, side, from));
    }
    moves
}

/// Jumps available to the piece of `side` standing on `from`.
pub fn jumps_from(board: &Board, side: Side, from: Coord) -> Vec<Move> {
    let piece = board.get(from);
    if !piece.belongs_to(side) {
        return Vec::new();
    }
    piece
        .directions()
        .iter()
        .filter_map(|&(dr, dc)| {
            let over = from.offset(dr, dc)?;
            let to = from.offset(2 * dr, 2 * dc)?;
            let capturable = board.get(to).is_empty() && board.get(over).belongs_to(side.opponent());
            capturable.then(|| Move::new(from, to))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn board_with(pieces: &[((usize, usize), Piece)]) -> Board {
        let mut board = Board::empty();
        for &(coord, piece) in pieces {
            board.set(coord.into(), piece);
        }
        board
    }

    #[test]
    fn test_rejects_out_of_range() {
        let board = Board::initial();
        assert!(!is_valid_move(&board, Side::White, Coord::new(5, 0), Coord::new(8, 1)));
        assert!(!is_valid_move(&board, Side::White, Coord::new(9, 9), Coord::new(4, 1)));
    }

    #[test]
    fn test_rejects_wrong_side_and_occupied_target() {
        let board = Board::initial();
        assert!(!is_valid_move(&board, Side::Black, Coord::new(5, 0), Coord::new(4, 1)));
        assert!(!is_valid_move(&board, Side::White, Coord::new(6, 1), Coord::new(5, 0)));
    }

    #[test]
    fn test_simple_forward_step() {
        let board = Board::initial();
        assert!(is_valid_move(&board, Side::White, Coord::new(5, 0), Coord::new(4, 1)));
        assert!(is_valid_move(&board, Side::Black, Coord::new(2, 1), Coord::new(3, 0)));
    }

    #[test]
    fn test_non_diagonal_and_long_moves_rejected() {
        let board = board_with(&[((5, 0), Piece::WhiteKing)]);
        assert!(!is_valid_move(&board, Side::White, Coord::new(5, 0), Coord::new(4, 0)));
        assert!(!is_valid_move(&board, Side::White, Coord::new(5, 0), Coord::new(2, 3)));
    }

    #[test]
    fn test_man_cannot_move_backward_king_can() {
        let board = board_with(&[((4, 3), Piece::WhiteMan), ((4, 5), Piece::WhiteKing)]);
        assert!(!is_valid_move(&board, Side::White, Coord::new(4, 3), Coord::new(5, 2)));
        assert!(is_valid_move(&board, Side::White, Coord::new(4, 5), Coord::new(5, 6)));
        assert!(is_valid_move(&board, Side::White, Coord::new(4, 5), Coord::new(3, 4)));
    }

    #[test]
    fn test_jump_needs_opponent_in_between() {
        let board = board_with(&[
            ((5, 2), Piece::WhiteMan),
            ((4, 3), Piece::BlackMan),
            ((4, 1), Piece::WhiteMan),
        ]);
        assert!(is_valid_move(&board, Side::White, Coord::new(5, 2), Coord::new(3, 4)));
        assert!(!is_valid_move(&board, Side::White, Coord::new(5, 2), Coord::new(3, 0)));
    }

    #[test]
    fn test_initial_white_moves() {
        let board = Board::initial();
        let moves = possible_moves(&board, Side::White, false);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_jump()));
        assert!(possible_moves(&board, Side::White, true).is_empty());
    }

    #[test]
    fn test_jumps_only_lists_captures() {
        let board = board_with(&[
            ((5, 2), Piece::WhiteMan),
            ((4, 3), Piece::BlackMan),
            ((7, 0), Piece::WhiteMan),
        ]);
        let jumps = possible_moves(&board, Side::White, true);
        assert_eq!(jumps, vec![Move::new((5, 2), (3, 4))]);
        let all = possible_moves(&board, Side::White, false);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_king_jumps_backward() {
        let board = board_with(&[((2, 3), Piece::BlackKing), ((1, 2), Piece::WhiteMan)]);
        assert_eq!(jumps_from(&board, Side::Black, Coord::new(2, 3)), vec![Move::new((2, 3), (0, 1))]);
        let man = board_with(&[((2, 3), Piece::BlackMan), ((1, 2), Piece::WhiteMan)]);
        assert!(jumps_from(&man, Side::Black, Coord::new(2, 3)).is_empty());
    }
}
