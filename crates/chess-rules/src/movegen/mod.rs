//! Pseudo-legal move generation.
//!
//! Destinations produced here follow each piece's movement pattern and the
//! occupancy of the board, but ignore king safety, castling and en passant.
//! Those are layered on top by [`MoveValidator`](crate::MoveValidator).

mod attacks;

use crate::Board;
use chess_core::{Piece, PieceKind, Position};

pub use attacks::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};

/// A list of destination squares with a fixed maximum capacity.
///
/// A queen in the middle of an empty board reaches 27 squares, the most of any
/// piece, so a small inline array avoids heap allocations.
#[derive(Clone)]
pub struct SquareList {
    squares: [Position; Self::MAX_SQUARES],
    len: usize,
}

impl SquareList {
    /// Maximum number of destinations a single piece can have.
    pub const MAX_SQUARES: usize = 32;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        SquareList {
            squares: [Position::A8; Self::MAX_SQUARES],
            len: 0,
        }
    }

    /// Adds a square to the list.
    #[inline]
    pub fn push(&mut self, pos: Position) {
        debug_assert!(self.len < Self::MAX_SQUARES);
        self.squares[self.len] = pos;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Position] {
        &self.squares[..self.len]
    }

    /// Returns true if the square is in the list.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.as_slice().contains(&pos)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only squares for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Position) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for SquareList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for SquareList {
    type Output = Position;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.squares[index]
    }
}

impl<'a> IntoIterator for &'a SquareList {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for SquareList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the squares `piece` could move to from `from`.
///
/// The piece does not have to be on the board at `from`; only the other
/// squares are consulted.
pub fn generate_moves(board: &Board, from: Position, piece: Piece) -> SquareList {
    let mut out = SquareList::new();
    let color = piece.color;

    match piece.kind {
        PieceKind::Pawn => attacks::pawn(board, from, color, &mut out),
        PieceKind::Knight => attacks::step(board, from, color, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => attacks::slide(board, from, color, &BISHOP_DIRECTIONS, &mut out),
        PieceKind::Rook => attacks::slide(board, from, color, &ROOK_DIRECTIONS, &mut out),
        PieceKind::Queen => attacks::slide(board, from, color, &QUEEN_DIRECTIONS, &mut out),
        PieceKind::King => attacks::step(board, from, color, &KING_OFFSETS, &mut out),
    }

    out
}

/// Returns true if `target` is among the pseudo-legal destinations of
/// `piece` on `from`.
///
/// For pawns this includes pushes onto empty squares, and excludes a
/// diagonal unless an enemy piece stands on it. Asked about an occupied
/// square, such as a king's, it therefore reports exactly the captures.
pub fn can_attack(board: &Board, from: Position, piece: Piece, target: Position) -> bool {
    generate_moves(board, from, piece).contains(target)
}

/// Returns true if `to` is among the pseudo-legal destinations of `piece`.
pub fn is_pseudo_legal(board: &Board, from: Position, to: Position, piece: Piece) -> bool {
    generate_moves(board, from, piece).contains(to)
}
