//! Text rendering of the board and game status.

use crate::config::DisplayConfig;
use chess_core::{Color, Piece, PieceKind, Position};
use chess_rules::{Board, GameState, GameStatus};

fn glyph(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

/// Draws the board as text, one rank per line.
pub fn render_board(board: &Board, display: &DisplayConfig) -> String {
    // Rows and columns run in the same direction: a8 top-left, or h1 when flipped.
    let order: Vec<u8> = if display.flip {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut out = String::new();
    for &row in &order {
        if display.coordinates {
            out.push_str(&format!("{} ", 8 - row));
        }
        let squares: Vec<String> = order
            .iter()
            .map(|&col| {
                let piece = Position::new(row, col)
                    .ok()
                    .and_then(|pos| board.piece_at(pos));
                match piece {
                    Some(piece) if display.unicode => glyph(piece).to_string(),
                    Some(piece) => piece.to_fen_char().to_string(),
                    None => ".".to_string(),
                }
            })
            .collect();
        out.push_str(&squares.join(" "));
        out.push('\n');
    }

    if display.coordinates {
        let files: Vec<String> = order
            .iter()
            .map(|&col| ((b'a' + col) as char).to_string())
            .collect();
        out.push_str("  ");
        out.push_str(&files.join(" "));
        out.push('\n');
    }
    out
}

/// Describes whose turn it is and how the game stands.
pub fn render_status(game: &GameState) -> String {
    let turn = game.turn();
    match game.status() {
        GameStatus::Active => format!("{} to move", turn),
        GameStatus::Check => format!("{} to move (check)", turn),
        GameStatus::Checkmate => format!("checkmate: {} wins", turn.opposite()),
        GameStatus::Stalemate => "stalemate: draw".to_string(),
        GameStatus::Draw => "draw".to_string(),
    }
}
