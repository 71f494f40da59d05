//! Game status derived from the board.

use crate::{Board, MoveValidator};
use chess_core::{Color, Move};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Play continues normally.
    #[default]
    Active,
    /// The side to move is in check but has a legal reply.
    Check,
    /// The side to move is in check with no legal reply.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
    /// Never produced: repetition and fifty-move draws are not detected.
    Draw,
}

impl GameStatus {
    /// Returns true if no further move can be made.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        };
        f.write_str(name)
    }
}

/// Derives the status of `to_move` on `board`.
///
/// Checkmate is tested first, then stalemate, then plain check.
pub fn evaluate_status(board: &Board, to_move: Color, last_move: Option<&Move>) -> GameStatus {
    let validator = MoveValidator::new(board);
    let in_check = validator.is_king_in_check(to_move);
    let can_move = validator.has_any_legal_moves(to_move, last_move);

    match (in_check, can_move) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Active,
    }
}
