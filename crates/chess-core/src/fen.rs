//! FEN (Forsyth-Edwards Notation) records.
//!
//! A [`FenRecord`] holds the six fields of a FEN string after syntactic
//! checks. Whether the placement is a playable position (both kings present,
//! en passant target behind a pawn) is decided by the rules engine.

use crate::{Color, PieceKind, Position};
use thiserror::Error;

/// Why a FEN string was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("bad piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("side to move must be 'w' or 'b', found '{0}'")]
    InvalidActiveColor(String),

    #[error("bad castling field '{0}'")]
    InvalidCastling(String),

    #[error("bad en passant target '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("bad move counter '{0}'")]
    InvalidClock(String),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("more than one {0} king on the board")]
    ExtraKing(Color),

    #[error("{0} is in check with the other side to move")]
    KingCapturable(Color),
}

/// The fields of a FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Ranks 8 to 1 separated by '/', digits counting empty squares.
    pub piece_placement: String,
    pub active_color: Color,
    /// Any of "KQkq" in that order, or "-".
    pub castling: String,
    pub en_passant: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

const CASTLING_FLAGS: [char; 4] = ['K', 'Q', 'k', 'q'];

impl FenRecord {
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Splits and checks a FEN string.
    pub fn parse(text: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        let &[placement, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenError::FieldCount(fields.len()));
        };

        check_placement(placement)?;
        Ok(FenRecord {
            piece_placement: placement.to_string(),
            active_color: parse_side(side)?,
            castling: parse_castling(castling)?,
            en_passant: parse_en_passant(en_passant)?,
            halfmove_clock: parse_clock(halfmove)?,
            fullmove_number: parse_clock(fullmove)?,
        })
    }

    /// Returns true if the castling field lists the right for `color` on the
    /// given wing.
    pub fn has_castling_right(&self, color: Color, kingside: bool) -> bool {
        let wing = if kingside {
            PieceKind::King
        } else {
            PieceKind::Queen
        };
        self.castling.contains(wing.to_fen_char(color))
    }

    pub fn to_fen(&self) -> String {
        let en_passant = match self.en_passant {
            Some(target) => target.to_algebraic(),
            None => "-".to_string(),
        };
        [
            self.piece_placement.clone(),
            self.active_color.to_fen_char().to_string(),
            self.castling.clone(),
            en_passant,
            self.halfmove_clock.to_string(),
            self.fullmove_number.to_string(),
        ]
        .join(" ")
    }
}

impl Default for FenRecord {
    fn default() -> Self {
        FenRecord {
            piece_placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(),
            active_color: Color::White,
            castling: "KQkq".to_string(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

fn check_placement(placement: &str) -> Result<(), FenError> {
    let bad = |reason: String| Err(FenError::InvalidPiecePlacement(reason));

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return bad(format!("{} ranks instead of 8", ranks.len()));
    }

    for (rank, text) in (1..=8).rev().zip(ranks) {
        let mut width = 0;
        for c in text.chars() {
            width += match c {
                '1'..='8' => c as u32 - '0' as u32,
                _ if PieceKind::from_fen_char(c).is_some() => 1,
                _ => return bad(format!("unexpected '{}' on rank {}", c, rank)),
            };
        }
        if width != 8 {
            return bad(format!("rank {} covers {} squares", rank, width));
        }
    }
    Ok(())
}

fn parse_side(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidActiveColor(field.to_string())),
    }
}

/// Accepts "-" or a non-empty subsequence of "KQkq".
fn parse_castling(field: &str) -> Result<String, FenError> {
    if field == "-" {
        return Ok(field.to_string());
    }
    let mut remaining = CASTLING_FLAGS.iter();
    let ordered = field
        .chars()
        .all(|c| remaining.by_ref().any(|&flag| flag == c));
    if ordered {
        Ok(field.to_string())
    } else {
        Err(FenError::InvalidCastling(field.to_string()))
    }
}

/// The target must be on the third or sixth rank.
fn parse_en_passant(field: &str) -> Result<Option<Position>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    match Position::from_algebraic(field) {
        Ok(target) if matches!(target.rank_char(), '3' | '6') => Ok(Some(target)),
        _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
    }
}

fn parse_clock(field: &str) -> Result<u32, FenError> {
    field
        .parse()
        .map_err(|_| FenError::InvalidClock(field.to_string()))
}
