//! The 8x8 occupancy grid.

use chess_core::{Color, FenError, Piece, PieceKind, Position};
use std::fmt;
use thiserror::Error;

/// Errors from direct board manipulation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece on {0} to move")]
    EmptySquare(Position),
}

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of optional pieces.
///
/// The board knows nothing about the rules. Cloning copies every square, and
/// because [`Piece`] is a plain value the clone shares no state with the
/// original.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_row() as usize;
            let pawns = color.pawn_row() as usize;
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                board.squares[back][col] = Some(Piece::new(kind, color));
                board.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Creates a board from a pre-populated grid, indexed `[row][col]`.
    pub const fn from_grid(squares: [[Option<Piece>; 8]; 8]) -> Self {
        Board { squares }
    }

    /// Builds a board from the placement field of a FEN record.
    ///
    /// Every piece starts with `has_moved == false`; callers that know better
    /// fix the flags afterwards.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let invalid = FenError::InvalidPiecePlacement;
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(invalid(format!("expected 8 ranks, got {}", rows.len())));
        }

        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                    continue;
                }
                let (kind, color) = PieceKind::from_fen_char(c)
                    .ok_or_else(|| invalid(format!("invalid character '{}'", c)))?;
                if col >= 8 {
                    return Err(invalid(format!("rank {} overflows", 8 - row)));
                }
                board.squares[row][col] = Some(Piece::new(kind, color));
                col += 1;
            }
            if col != 8 {
                return Err(invalid(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }

        Ok(board)
    }

    /// Renders the placement field of a FEN record.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for (row, squares) in self.squares.iter().enumerate() {
            let mut empty = 0;
            for square in squares {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row() as usize][pos.col() as usize]
    }

    /// Returns true if nothing stands on the given square.
    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Places (or clears, with `None`) a square, returning what was there.
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[pos.row() as usize][pos.col() as usize], piece)
    }

    /// Relocates the piece on `from` to `to`, marking it as moved.
    ///
    /// Whatever stood on `to` is replaced and returned.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>, BoardError> {
        let piece = self
            .set_piece(from, None)
            .ok_or(BoardError::EmptySquare(from))?;
        Ok(self.set_piece(to, Some(piece.moved())))
    }

    /// Iterates over every occupied square, row by row from a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Iterates over the squares occupied by the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the square of the given color's king.
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Returns the raw grid, indexed `[row][col]`.
    pub fn grid(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for square in squares {
                let c = square.map_or('.', |piece| piece.to_fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(Position::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Position::D8),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq("e2")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert!(board.is_empty_at(sq("e4")));
        assert_eq!(board.placement(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn move_piece_marks_moved() {
        let mut board = Board::standard();
        let captured = board.move_piece(sq("g1"), sq("f3")).unwrap();
        assert_eq!(captured, None);
        assert!(board.is_empty_at(sq("g1")));
        let knight = board.piece_at(sq("f3")).unwrap();
        assert!(knight.is(PieceKind::Knight, Color::White));
        assert!(knight.has_moved);
    }

    #[test]
    fn move_piece_returns_captured() {
        let mut board = Board::standard();
        let captured = board.move_piece(sq("a1"), sq("a7")).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
    }

    #[test]
    fn move_piece_from_empty_square_fails() {
        let mut board = Board::standard();
        let before = board.clone();
        assert_eq!(
            board.move_piece(sq("e4"), sq("e5")),
            Err(BoardError::EmptySquare(sq("e4")))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn clone_is_independent() {
        let board = Board::standard();
        let mut copy = board.clone();
        copy.move_piece(sq("e2"), sq("e4")).unwrap();

        assert_ne!(board, copy);
        assert!(!board.piece_at(sq("e2")).unwrap().has_moved);
        assert!(board.is_empty_at(sq("e4")));
    }

    #[test]
    fn from_grid_matches_source() {
        let board = Board::standard();
        assert_eq!(Board::from_grid(*board.grid()), board);
    }

    #[test]
    fn set_piece_replaces() {
        let mut board = Board::empty();
        let queen = Piece::new(PieceKind::Queen, Color::Black);
        assert_eq!(board.set_piece(sq("d4"), Some(queen)), None);
        assert_eq!(board.set_piece(sq("d4"), None), Some(queen));
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn find_king() {
        let board = Board::standard();
        assert_eq!(board.find_king(Color::White), Some(Position::E1));
        assert_eq!(board.find_king(Color::Black), Some(Position::E8));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn placement_roundtrip() {
        let placement = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
        let board = Board::from_placement(placement).unwrap();
        assert_eq!(board.placement(), placement);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
    }

    #[test]
    fn placement_errors() {
        assert!(Board::from_placement("8/8/8").is_err());
        assert!(Board::from_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("x7/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn display_grid() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
