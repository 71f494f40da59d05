//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! front-ends:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece identity
//! - [`Position`] for board coordinates (row 0 is the eighth rank)
//! - [`Move`] and [`MoveKind`] for recorded moves
//! - FEN field parsing

mod color;
mod fen;
mod mov;
mod piece;
mod position;

pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use position::{Position, PositionError};
