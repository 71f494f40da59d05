//! Standard Algebraic Notation (SAN) generation and parsing.
//!
//! Generated notation is the short form used for the move history: no check
//! suffix, no disambiguation, and promotion always written as "=Q". Parsing
//! is more forgiving and accepts the usual suffixes and disambiguators.
//! Examples: "e4", "Nf3", "exd5", "O-O", "e8=Q", "Nbd2", "R1e1"

use crate::{Board, CastleSide, MoveValidator};
use chess_core::{Color, Move, MoveKind, Piece, PieceKind, Position};
use thiserror::Error;

/// Error type for SAN parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,

    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),

    #[error("only queen promotion is supported: {0}")]
    UnsupportedPromotion(String),

    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),

    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

/// Renders a move in short algebraic notation.
///
/// `captures` is whether a piece stood on the destination square; en passant
/// is always written as a capture.
pub fn move_notation(
    piece: Piece,
    from: Position,
    to: Position,
    kind: MoveKind,
    captures: bool,
) -> String {
    match kind {
        MoveKind::CastleKingside => return CastleSide::Kingside.notation().to_string(),
        MoveKind::CastleQueenside => return CastleSide::Queenside.notation().to_string(),
        _ => {}
    }

    let mut san = String::new();
    if let Some(letter) = piece.kind.san_letter() {
        san.push(letter);
    }
    if captures || kind == MoveKind::EnPassant {
        if piece.kind == PieceKind::Pawn {
            san.push(from.file_char());
        }
        san.push('x');
    }
    san.push_str(&to.to_algebraic());
    if kind == MoveKind::Promotion {
        san.push_str("=Q");
    }
    san
}

#[derive(Debug)]
struct ParsedSan {
    piece: PieceKind,
    from_col: Option<u8>,
    from_row: Option<u8>,
    to: Position,
}

/// Resolves a SAN string to the `(from, to)` squares of a legal move for
/// `to_move`.
pub fn san_to_squares(
    board: &Board,
    to_move: Color,
    last_move: Option<&Move>,
    san: &str,
) -> Result<(Position, Position), SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }
    let san = san.trim_end_matches(['+', '#']);

    let validator = MoveValidator::new(board);
    match san {
        "O-O" | "0-0" => return find_castling(&validator, to_move, CastleSide::Kingside),
        "O-O-O" | "0-0-0" => return find_castling(&validator, to_move, CastleSide::Queenside),
        _ => {}
    }

    let parsed = parse_san_components(san)?;
    find_matching_move(&validator, to_move, last_move, &parsed, san)
}

fn parse_san_components(san: &str) -> Result<ParsedSan, SanError> {
    let invalid = |what: &str| SanError::InvalidFormat(format!("{}: {}", what, san));

    let mut chars: Vec<char> = san.chars().collect();
    let piece = match chars.first().copied().and_then(PieceKind::from_san_letter) {
        Some(kind) => {
            chars.remove(0);
            kind
        }
        None => PieceKind::Pawn,
    };

    if let Some(eq) = chars.iter().position(|&c| c == '=') {
        let suffix: String = chars[eq + 1..].iter().collect();
        let mut promo = suffix.chars();
        let (Some(letter), None) = (promo.next(), promo.next()) else {
            return Err(invalid("invalid promotion"));
        };
        if piece != PieceKind::Pawn {
            return Err(invalid("only pawns promote"));
        }
        match PieceKind::from_san_letter(letter) {
            Some(PieceKind::Queen) => {}
            Some(PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight) => {
                return Err(SanError::UnsupportedPromotion(san.to_string()))
            }
            _ => return Err(invalid("invalid promotion piece")),
        }
        chars.truncate(eq);
    }

    chars.retain(|&c| c != 'x');

    if chars.len() < 2 {
        return Err(invalid("too short"));
    }
    let split = chars.len() - 2;
    let dest: String = chars[split..].iter().collect();
    let to = Position::from_algebraic(&dest).map_err(|_| invalid("invalid square"))?;

    let (from_col, from_row) =
        parse_disambiguation(&chars[..split]).ok_or_else(|| invalid("invalid disambiguation"))?;

    Ok(ParsedSan {
        piece,
        from_col,
        from_row,
        to,
    })
}

/// Returns the column and/or row named by a disambiguator such as "b", "1"
/// or "b1".
fn parse_disambiguation(chars: &[char]) -> Option<(Option<u8>, Option<u8>)> {
    match chars {
        &[] => Some((None, None)),
        &[c] => match (file_to_col(c), rank_to_row(c)) {
            (Some(col), _) => Some((Some(col), None)),
            (_, Some(row)) => Some((None, Some(row))),
            _ => None,
        },
        &[f, r] => Some((Some(file_to_col(f)?), Some(rank_to_row(r)?))),
        _ => None,
    }
}

fn file_to_col(c: char) -> Option<u8> {
    ('a'..='h').contains(&c).then(|| c as u8 - b'a')
}

fn rank_to_row(c: char) -> Option<u8> {
    ('1'..='8').contains(&c).then(|| b'8' - c as u8)
}

fn find_castling(
    validator: &MoveValidator<'_>,
    color: Color,
    side: CastleSide,
) -> Result<(Position, Position), SanError> {
    if validator.can_castle(color, side) {
        Ok((CastleSide::king_home(color), side.king_destination(color)))
    } else {
        Err(SanError::NoMatchingMove(side.notation().to_string()))
    }
}

fn find_matching_move(
    validator: &MoveValidator<'_>,
    color: Color,
    last_move: Option<&Move>,
    parsed: &ParsedSan,
    san: &str,
) -> Result<(Position, Position), SanError> {
    let mut matching = validator
        .board()
        .pieces_of(color)
        .filter(|(from, piece)| {
            piece.kind == parsed.piece
                && parsed.from_col.map_or(true, |col| from.col() == col)
                && parsed.from_row.map_or(true, |row| from.row() == row)
        })
        .filter(|(from, piece)| {
            // A king's two-column shift must be written as castling.
            let castles = piece.kind == PieceKind::King
                && CastleSide::from_king_shift(*from, parsed.to).is_some();
            !castles
                && validator
                    .get_legal_moves(*from, *piece, last_move)
                    .contains(parsed.to)
        })
        .map(|(from, _)| (from, parsed.to));

    match (matching.next(), matching.next()) {
        (None, _) => Err(SanError::NoMatchingMove(san.to_string())),
        (Some(squares), None) => Ok(squares),
        (Some(_), Some(_)) => Err(SanError::AmbiguousMove(san.to_string())),
    }
}
