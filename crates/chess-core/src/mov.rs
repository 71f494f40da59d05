//! Move representation.

use crate::{Piece, PieceKind, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an executed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Quiet move to an empty square.
    Normal,
    /// Capture on the destination square.
    Capture,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// En passant capture.
    EnPassant,
    /// Pawn promotion (possibly with a capture).
    Promotion,
}

impl MoveKind {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// A recorded move.
///
/// Holds snapshots of the moving piece and of any captured piece as they were
/// immediately before the move. A `Move` is assembled once by the rules engine
/// and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    from: Position,
    to: Position,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
    timestamp: DateTime<Utc>,
    notation: String,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move record stamped with the current time.
    pub fn new(from: Position, to: Position, piece: Piece, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            kind,
            timestamp: Utc::now(),
            notation: String::new(),
            promotion: None,
        }
    }

    /// Sets the captured piece.
    pub fn with_captured(mut self, captured: Option<Piece>) -> Self {
        self.captured = captured;
        self
    }

    /// Sets the piece type a pawn promotes to.
    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// Sets the algebraic notation.
    pub fn with_notation(mut self, notation: impl Into<String>) -> Self {
        self.notation = notation.into();
        self
    }

    /// Returns the source square.
    #[inline]
    pub fn from(&self) -> Position {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub fn to(&self) -> Position {
        self.to
    }

    /// Returns the moving piece as it was before the move.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the captured piece, if any.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Returns the move classification.
    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns when the move was recorded.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the algebraic notation (e.g., "e4", "Nf3", "O-O").
    #[inline]
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Returns the promotion piece type, if this was a promotion.
    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns true if a piece was taken by this move.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if this was a pawn advancing two rows.
    pub fn is_double_pawn_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.from.col() == self.to.col()
            && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(&self) -> String {
        let promo = match self.promotion {
            Some(PieceKind::Knight) => "n",
            Some(PieceKind::Bishop) => "b",
            Some(PieceKind::Rook) => "r",
            Some(PieceKind::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.notation.is_empty() {
            write!(f, "{}", self.to_uci())
        } else {
            write!(f, "{}", self.notation)
        }
    }
}
