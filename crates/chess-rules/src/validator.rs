//! Legal move validation.
//!
//! Legality is decided by simulation: a candidate move is applied to a clone
//! of the board and rejected if the mover's king is then attacked. This one
//! test covers moving into check, pinned pieces and failing to answer an
//! existing check. Castling and en passant are not pseudo-legal and are
//! routed through their own eligibility checks.

use crate::movegen::{self, SquareList};
use crate::Board;
use chess_core::{Color, Move, Piece, PieceKind, Position};
use serde::{Deserialize, Serialize};

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column step from the king towards the rook.
    const fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    /// Column distance from the king's home square to the rook's.
    const fn rook_distance(self) -> i8 {
        match self {
            CastleSide::Kingside => 3,
            CastleSide::Queenside => 4,
        }
    }

    /// Returns the side a two-column king shift from `from` to `to` belongs to.
    pub fn from_king_shift(from: Position, to: Position) -> Option<CastleSide> {
        if from.row() != to.row() {
            return None;
        }
        match to.col() as i8 - from.col() as i8 {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Returns the king's home square for the given color.
    pub const fn king_home(color: Color) -> Position {
        match color {
            Color::White => Position::E1,
            Color::Black => Position::E8,
        }
    }

    /// Where the king lands.
    pub fn king_destination(self, color: Color) -> Position {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Position::G1,
            (CastleSide::Queenside, Color::White) => Position::C1,
            (CastleSide::Kingside, Color::Black) => Position::G8,
            (CastleSide::Queenside, Color::Black) => Position::C8,
        }
    }

    /// The rook's home corner.
    pub fn rook_home(self, color: Color) -> Position {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Position::H1,
            (CastleSide::Queenside, Color::White) => Position::A1,
            (CastleSide::Kingside, Color::Black) => Position::H8,
            (CastleSide::Queenside, Color::Black) => Position::A8,
        }
    }

    /// Where the rook lands, next to the king on the inside.
    pub fn rook_destination(self, color: Color) -> Position {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Position::F1,
            (CastleSide::Queenside, Color::White) => Position::D1,
            (CastleSide::Kingside, Color::Black) => Position::F8,
            (CastleSide::Queenside, Color::Black) => Position::D8,
        }
    }

    /// Returns the standard notation ("O-O" or "O-O-O").
    pub const fn notation(self) -> &'static str {
        match self {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
    }
}

/// Returns true if `color`'s king is attacked on the given board.
///
/// A board without a king of that color is never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    board
        .pieces_of(color.opposite())
        .any(|(from, piece)| movegen::can_attack(board, from, piece, king))
}

/// Answers legality questions about a single board.
///
/// The validator borrows the board and never mutates it: every simulation
/// runs on a clone.
#[derive(Debug, Clone, Copy)]
pub struct MoveValidator<'a> {
    board: &'a Board,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board) -> Self {
        MoveValidator { board }
    }

    /// Returns the board under validation.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Returns true if `color`'s king is attacked.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        is_king_in_check(self.board, color)
    }

    /// Returns true if `piece` standing on `from` may legally move to `to`.
    ///
    /// `last_move` supplies the en passant context.
    pub fn is_legal_move(
        &self,
        from: Position,
        to: Position,
        piece: Piece,
        last_move: Option<&Move>,
    ) -> bool {
        if movegen::is_pseudo_legal(self.board, from, to, piece) {
            let mut sim = self.board.clone();
            sim.set_piece(from, None);
            sim.set_piece(to, Some(piece.moved()));
            return !is_king_in_check(&sim, piece.color);
        }

        match piece.kind {
            PieceKind::King if !piece.has_moved && from == CastleSide::king_home(piece.color) => {
                CastleSide::from_king_shift(from, to)
                    .is_some_and(|side| self.can_castle(piece.color, side))
            }
            PieceKind::Pawn if self.is_en_passant_shape(from, to, piece.color) => {
                self.can_en_passant(from, to, piece.color, last_move)
            }
            _ => false,
        }
    }

    /// A forward diagonal pawn step into an empty square.
    fn is_en_passant_shape(&self, from: Position, to: Position, color: Color) -> bool {
        to.row() as i8 - from.row() as i8 == color.pawn_direction()
            && from.col().abs_diff(to.col()) == 1
            && self.board.is_empty_at(to)
    }

    /// Returns true if `color` may castle towards `side`.
    ///
    /// The king and rook must both be unmoved on their home squares, the
    /// squares between them empty, and the king may not be in check, pass
    /// through an attacked square or land on one.
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        let home = CastleSide::king_home(color);
        let Some(king) = self.board.piece_at(home) else {
            return false;
        };
        if !king.is(PieceKind::King, color) || king.has_moved {
            return false;
        }

        let rook_home = side.rook_home(color);
        let rook_ok = self
            .board
            .piece_at(rook_home)
            .is_some_and(|rook| rook.is(PieceKind::Rook, color) && !rook.has_moved);
        if !rook_ok {
            return false;
        }

        let step = side.step();
        let path_clear = (1..side.rook_distance()).all(|n| {
            home.offset(0, step * n)
                .is_some_and(|pos| self.board.is_empty_at(pos))
        });
        if !path_clear || self.is_king_in_check(color) {
            return false;
        }

        (1..=2).all(|n| {
            let Some(transit) = home.offset(0, step * n) else {
                return false;
            };
            let mut sim = self.board.clone();
            sim.set_piece(home, None);
            sim.set_piece(transit, Some(king));
            !is_king_in_check(&sim, color)
        })
    }

    /// Returns true if the pawn of `color` on `from` may capture en passant
    /// by moving to `to`.
    ///
    /// Only possible directly after the enemy pawn's double step, which lands
    /// it beside the capturing pawn.
    pub fn can_en_passant(
        &self,
        from: Position,
        to: Position,
        color: Color,
        last_move: Option<&Move>,
    ) -> bool {
        let Some(last) = last_move else {
            return false;
        };
        if !last.is_double_pawn_step() || last.piece().color == color {
            return false;
        }
        if from.row() != color.en_passant_row() {
            return false;
        }

        let victim_square = last.to();
        if victim_square.row() != from.row() || victim_square.col().abs_diff(from.col()) != 1 {
            return false;
        }
        let victim_ok = self
            .board
            .piece_at(victim_square)
            .is_some_and(|victim| victim.is(PieceKind::Pawn, color.opposite()));
        if !victim_ok || victim_square.offset(color.pawn_direction(), 0) != Some(to) {
            return false;
        }

        let Some(pawn) = self
            .board
            .piece_at(from)
            .filter(|pawn| pawn.is(PieceKind::Pawn, color))
        else {
            return false;
        };

        let mut sim = self.board.clone();
        sim.set_piece(from, None);
        sim.set_piece(to, Some(pawn.moved()));
        sim.set_piece(victim_square, None);
        !is_king_in_check(&sim, color)
    }

    /// Returns every square `piece` on `from` may legally move to.
    pub fn get_legal_moves(
        &self,
        from: Position,
        piece: Piece,
        last_move: Option<&Move>,
    ) -> SquareList {
        let mut moves = movegen::generate_moves(self.board, from, piece);
        moves.retain(|to| self.is_legal_move(from, to, piece, last_move));

        match piece.kind {
            PieceKind::King if !piece.has_moved && from == CastleSide::king_home(piece.color) => {
                for side in CastleSide::ALL {
                    if self.can_castle(piece.color, side) {
                        moves.push(side.king_destination(piece.color));
                    }
                }
            }
            PieceKind::Pawn => {
                for d_col in [-1, 1] {
                    let Some(to) = from.offset(piece.color.pawn_direction(), d_col) else {
                        continue;
                    };
                    if self.board.is_empty_at(to)
                        && self.can_en_passant(from, to, piece.color, last_move)
                    {
                        moves.push(to);
                    }
                }
            }
            _ => {}
        }

        moves
    }

    /// Returns true if any piece of `color` has a legal move.
    pub fn has_any_legal_moves(&self, color: Color, last_move: Option<&Move>) -> bool {
        self.board
            .pieces_of(color)
            .any(|(from, piece)| !self.get_legal_moves(from, piece, last_move).is_empty())
    }

    /// In check with no legal move.
    pub fn is_checkmate(&self, color: Color, last_move: Option<&Move>) -> bool {
        self.is_king_in_check(color) && !self.has_any_legal_moves(color, last_move)
    }

    /// Not in check, yet no legal move.
    pub fn is_stalemate(&self, color: Color, last_move: Option<&Move>) -> bool {
        !self.is_king_in_check(color) && !self.has_any_legal_moves(color, last_move)
    }
}
