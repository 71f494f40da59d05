//! Rules engine for standard chess.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid of pieces with no rule knowledge
//! - [`movegen`] - pseudo-legal destinations per piece type
//! - [`MoveValidator`] - king safety, castling and en passant
//! - [`MoveHistory`] - executed moves with pre-move board snapshots
//! - [`GameState`] - move execution, undo and status tracking
//! - SAN generation and parsing, and perft
//!
//! # Example
//!
//! ```
//! use chess_core::Position;
//! use chess_rules::{GameState, GameStatus};
//!
//! let mut game = GameState::new();
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//!
//! let outcome = game.make_move(e2, e4).unwrap();
//! assert_eq!(outcome.mov.notation(), "e4");
//! assert_eq!(outcome.status, GameStatus::Active);
//!
//! game.make_move_san("e5").unwrap();
//! assert!(game.undo());
//! assert_eq!(game.move_count(), 1);
//! ```

mod board;
mod game;
mod history;
pub mod movegen;
pub mod notation;
pub mod perft;
mod status;
mod validator;

pub use board::{Board, BoardError};
pub use game::{GameError, GameState, MoveOutcome};
pub use history::{HistoryEntry, MoveHistory};
pub use movegen::{can_attack, generate_moves, is_pseudo_legal, SquareList};
pub use notation::{move_notation, san_to_squares, SanError};
pub use perft::{perft, perft_divide};
pub use status::{evaluate_status, GameStatus};
pub use validator::{is_king_in_check, CastleSide, MoveValidator};
