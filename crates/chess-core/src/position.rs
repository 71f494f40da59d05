//! Board coordinate representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building a [`Position`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("position (row {row}, col {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("invalid square name: '{0}'")]
    InvalidAlgebraic(String),
}

/// A square on the board, addressed by row and column.
///
/// Row 0 is the eighth rank and column 0 is the a-file, so `rank = 8 - row`
/// and `file = 'a' + col`:
/// - a8 = (0, 0), h8 = (0, 7)
/// - a1 = (7, 0), h1 = (7, 7)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, failing if either coordinate is outside 0-7.
    pub fn new(row: u8, col: u8) -> Result<Self, PositionError> {
        if row < 8 && col < 8 {
            Ok(Position { row, col })
        } else {
            Err(PositionError::OutOfBounds { row, col })
        }
    }

    /// Parses a position from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, PositionError> {
        let invalid = || PositionError::InvalidAlgebraic(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Position {
            row: 8 - (rank - b'0'),
            col: file - b'a',
        })
    }

    /// Returns the row (0 = eighth rank).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0 = a-file).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank digit ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'0' + 8 - self.row) as char
    }

    /// Returns the algebraic notation for this position.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Returns the position shifted by the given row and column deltas,
    /// or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        match ((self.row as i8).checked_add(d_row), (self.col as i8).checked_add(d_col)) {
            (Some(row @ 0..=7), Some(col @ 0..=7)) => Some(Position {
                row: row as u8,
                col: col as u8,
            }),
            _ => None,
        }
    }

    /// Iterates over all 64 positions, row by row from a8 to h1.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position { row, col }))
    }

    // Squares the castling rules refer to.
    pub const A1: Position = Position { row: 7, col: 0 };
    pub const B1: Position = Position { row: 7, col: 1 };
    pub const C1: Position = Position { row: 7, col: 2 };
    pub const D1: Position = Position { row: 7, col: 3 };
    pub const E1: Position = Position { row: 7, col: 4 };
    pub const F1: Position = Position { row: 7, col: 5 };
    pub const G1: Position = Position { row: 7, col: 6 };
    pub const H1: Position = Position { row: 7, col: 7 };
    pub const A8: Position = Position { row: 0, col: 0 };
    pub const B8: Position = Position { row: 0, col: 1 };
    pub const C8: Position = Position { row: 0, col: 2 };
    pub const D8: Position = Position { row: 0, col: 3 };
    pub const E8: Position = Position { row: 0, col: 4 };
    pub const F8: Position = Position { row: 0, col: 5 };
    pub const G8: Position = Position { row: 0, col: 6 };
    pub const H8: Position = Position { row: 0, col: 7 };
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_algebraic(s)
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_algebraic()
    }
}

impl TryFrom<String> for Position {
    type Error = PositionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Position::from_algebraic(&s)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_algebraic())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
