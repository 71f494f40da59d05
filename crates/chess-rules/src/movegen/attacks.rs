//! Movement patterns for every piece type.

use crate::Board;
use chess_core::{Color, Position};

use super::SquareList;

/// Rook directions as (row, col) steps.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bishop directions as (row, col) steps.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Queen directions: rook and bishop combined.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Knight jumps as (row, col) offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps as (row, col) offsets.
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

/// Walks each direction until blocked.
///
/// Empty squares are collected; the first occupied square ends the ray and is
/// collected only if it holds an enemy piece.
pub fn slide(board: &Board, from: Position, color: Color, directions: &[(i8, i8)], out: &mut SquareList) {
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => out.push(next),
                Some(piece) => {
                    if piece.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Collects each in-bounds offset not occupied by a friendly piece.
pub fn step(board: &Board, from: Position, color: Color, offsets: &[(i8, i8)], out: &mut SquareList) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.piece_at(to).map_or(true, |piece| piece.color != color) {
                out.push(to);
            }
        }
    }
}

/// Collects pawn pushes and diagonal captures.
///
/// En passant is not generated here: it depends on the previous move.
pub fn pawn(board: &Board, from: Position, color: Color, out: &mut SquareList) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty_at(one) {
            out.push(one);
            if from.row() == color.pawn_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty_at(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(dir, d_col) {
            if board.piece_at(to).is_some_and(|piece| piece.color != color) {
                out.push(to);
            }
        }
    }
}
