//! Game orchestration.
//!
//! [`GameState`] owns the live board, the move history and the side to move.
//! Every command validates first and mutates second: a move is executed on a
//! copy of the board that replaces the live one only once the whole move
//! (including castling and en passant side effects) has succeeded.

use crate::history::MoveHistory;
use crate::notation::{self, SanError};
use crate::status::{evaluate_status, GameStatus};
use crate::validator::{CastleSide, MoveValidator};
use crate::{Board, BoardError};
use chess_core::{Color, FenError, FenRecord, Move, MoveKind, Piece, PieceKind, Position};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a game command is rejected.
///
/// A rejected command leaves the game exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no piece on {0}")]
    NoPieceAtSource(Position),

    #[error("it is {expected}'s turn, not {found}'s")]
    WrongTurn { expected: Color, found: Color },

    #[error("the game is over ({0})")]
    GameOver(GameStatus),

    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("no move to undo")]
    EmptyHistory,

    #[error("invalid SAN: {0}")]
    InvalidSan(#[from] SanError),
}

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The recorded move.
    pub mov: Move,
    /// Status of the side now to move.
    pub status: GameStatus,
    /// The piece taken, if any.
    pub captured: Option<Piece>,
}

/// A game of chess in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    history: MoveHistory,
    turn: Color,
    /// Recomputed after every move, undo and reset.
    status: GameStatus,
    /// Double step implied by a FEN en passant field, used until the first
    /// move is played.
    seed_move: Option<Move>,
    start_halfmove: u32,
    start_fullmove: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        Self::with_board(Board::standard(), Color::White)
    }

    fn with_board(board: Board, turn: Color) -> Self {
        let mut game = GameState {
            board,
            history: MoveHistory::new(),
            turn,
            status: GameStatus::Active,
            seed_move: None,
            start_halfmove: 0,
            start_fullmove: 1,
        };
        game.refresh_status();
        game
    }

    /// Creates a game from a FEN record.
    ///
    /// `has_moved` flags are inferred: pawns off their start row count as
    /// moved, and kings and rooks count as unmoved only where a castling
    /// right says so. Each color needs exactly one king, and the side not to
    /// move must not be in check.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen = FenRecord::parse(fen)?;
        let mut board = Board::from_placement(&fen.piece_placement)?;

        for color in Color::ALL {
            let kings = board
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(FenError::MissingKing(color)),
                1 => {}
                _ => return Err(FenError::ExtraKing(color)),
            }
        }
        let waiting = fen.active_color.opposite();
        if MoveValidator::new(&board).is_king_in_check(waiting) {
            return Err(FenError::KingCapturable(waiting));
        }

        let placed: Vec<(Position, Piece)> = board.pieces().collect();
        for (pos, piece) in placed {
            let color = piece.color;
            let unmoved = match piece.kind {
                PieceKind::Pawn => pos.row() == color.pawn_row(),
                PieceKind::King => {
                    pos == CastleSide::king_home(color)
                        && (fen.has_castling_right(color, true)
                            || fen.has_castling_right(color, false))
                }
                PieceKind::Rook => CastleSide::ALL.into_iter().any(|side| {
                    side.rook_home(color) == pos
                        && fen.has_castling_right(color, side == CastleSide::Kingside)
                }),
                _ => true,
            };
            board.set_piece(pos, Some(piece.with_moved(!unmoved)));
        }

        let seed_move = match fen.en_passant {
            Some(target) => Some(Self::seed_double_step(&board, fen.active_color, target)?),
            None => None,
        };

        let mut game = Self::with_board(board, fen.active_color);
        game.seed_move = seed_move;
        game.start_halfmove = fen.halfmove_clock;
        game.start_fullmove = fen.fullmove_number.max(1);
        game.refresh_status();
        Ok(game)
    }

    /// Rebuilds the double step that produced a FEN en passant target.
    fn seed_double_step(board: &Board, to_move: Color, target: Position) -> Result<Move, FenError> {
        let mover = to_move.opposite();
        let dir = mover.pawn_direction();
        let invalid = || FenError::InvalidEnPassantSquare(target.to_algebraic());

        let landing = target.offset(dir, 0).ok_or_else(invalid)?;
        let origin = target.offset(-dir, 0).ok_or_else(invalid)?;
        let pawn_there = board
            .piece_at(landing)
            .is_some_and(|piece| piece.is(PieceKind::Pawn, mover));
        if landing.row() != to_move.en_passant_row() || !pawn_there || !board.is_empty_at(target) {
            return Err(invalid());
        }

        Ok(
            Move::new(origin, landing, Piece::new(PieceKind::Pawn, mover), MoveKind::Normal)
                .with_notation(landing.to_algebraic()),
        )
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns the executed moves, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.moves()
    }

    /// Returns the most recent move, including one implied by a FEN en
    /// passant field.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last_move().or(self.seed_move.as_ref())
    }

    /// Returns the number of moves played in this game.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Returns true if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        MoveValidator::new(&self.board).is_king_in_check(self.turn)
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the side that delivered checkmate.
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then(|| self.turn.opposite())
    }

    /// Returns the legal destinations of the piece on `pos`.
    ///
    /// Empty if the square is empty or holds a piece of the side not to move.
    pub fn legal_moves(&self, pos: Position) -> Vec<Position> {
        match self.board.piece_at(pos) {
            Some(piece) if piece.color == self.turn => MoveValidator::new(&self.board)
                .get_legal_moves(pos, piece, self.last_move())
                .as_slice()
                .to_vec(),
            _ => Vec::new(),
        }
    }

    /// Returns every legal `(from, to)` pair for the side to move.
    pub fn all_legal_moves(&self) -> Vec<(Position, Position)> {
        let validator = MoveValidator::new(&self.board);
        let last_move = self.last_move();
        self.board
            .pieces_of(self.turn)
            .flat_map(|(from, piece)| {
                validator
                    .get_legal_moves(from, piece, last_move)
                    .as_slice()
                    .iter()
                    .map(move |&to| (from, to))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Moves the piece on `from` to `to`.
    ///
    /// A pawn reaching the last rank always becomes a queen.
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, GameError> {
        let result = self.apply_move(from, to);
        if let Err(err) = &result {
            debug!(%from, %to, %err, "move rejected");
        }
        result
    }

    /// Plays a move written in standard algebraic notation.
    pub fn make_move_san(&mut self, san: &str) -> Result<MoveOutcome, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }
        let (from, to) = notation::san_to_squares(&self.board, self.turn, self.last_move(), san)
            .map_err(|err| {
                debug!(san, %err, "move rejected");
                err
            })?;
        self.make_move(from, to)
    }

    fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, GameError> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::NoPieceAtSource(from))?;
        if piece.color != self.turn {
            return Err(GameError::WrongTurn {
                expected: self.turn,
                found: piece.color,
            });
        }
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        let last_move = self.last_move();
        if !MoveValidator::new(&self.board).is_legal_move(from, to, piece, last_move) {
            return Err(GameError::IllegalMove { from, to });
        }

        let color = piece.color;
        let target = self.board.piece_at(to);
        let castle = match piece.kind {
            PieceKind::King => CastleSide::from_king_shift(from, to),
            _ => None,
        };
        // The captured pawn sits beside the capturing pawn, behind `to`.
        let passed_square = to.offset(-color.pawn_direction(), 0);
        let en_passant = piece.kind == PieceKind::Pawn && from.col() != to.col() && target.is_none();

        let (kind, captured) = if let Some(side) = castle {
            let kind = match side {
                CastleSide::Kingside => MoveKind::CastleKingside,
                CastleSide::Queenside => MoveKind::CastleQueenside,
            };
            (kind, None)
        } else if en_passant {
            let passed = passed_square.and_then(|pos| self.board.piece_at(pos));
            (MoveKind::EnPassant, passed)
        } else if piece.kind == PieceKind::Pawn && to.row() == color.promotion_row() {
            (MoveKind::Promotion, target)
        } else if target.is_some() {
            (MoveKind::Capture, target)
        } else {
            (MoveKind::Normal, None)
        };

        let mut mov = Move::new(from, to, piece, kind)
            .with_captured(captured)
            .with_notation(notation::move_notation(piece, from, to, kind, target.is_some()));
        if kind == MoveKind::Promotion {
            mov = mov.with_promotion(PieceKind::Queen);
        }

        let mut next = self.board.clone();
        Self::execute(&mut next, &mov, castle, passed_square)
            .map_err(|_| GameError::IllegalMove { from, to })?;

        let before = std::mem::replace(&mut self.board, next);
        self.history.push(mov.clone(), before);
        self.turn = self.turn.opposite();
        self.refresh_status();

        debug!(
            notation = %mov,
            %from,
            %to,
            status = %self.status,
            "move executed"
        );
        if self.status.is_terminal() {
            info!(status = %self.status, winner = ?self.winner(), "game over");
        }

        Ok(MoveOutcome {
            mov,
            status: self.status,
            captured,
        })
    }

    /// Applies the board mutations of a validated move.
    fn execute(
        board: &mut Board,
        mov: &Move,
        castle: Option<CastleSide>,
        passed_square: Option<Position>,
    ) -> Result<(), BoardError> {
        let color = mov.piece().color;
        board.move_piece(mov.from(), mov.to())?;

        match mov.kind() {
            kind if kind.is_castling() => {
                if let Some(side) = castle {
                    board.move_piece(side.rook_home(color), side.rook_destination(color))?;
                }
            }
            MoveKind::EnPassant => {
                if let Some(pos) = passed_square {
                    board.set_piece(pos, None);
                }
            }
            MoveKind::Promotion => {
                let queen = Piece::new(PieceKind::Queen, color).moved();
                board.set_piece(mov.to(), Some(queen));
            }
            _ => {}
        }

        Ok(())
    }

    /// Takes back the most recent move, returning it.
    ///
    /// The board is restored from the snapshot taken before the move, so
    /// captured pieces and `has_moved` flags come back exactly.
    pub fn undo_move(&mut self) -> Result<Move, GameError> {
        let Some(entry) = self.history.pop() else {
            debug!("undo rejected: no moves to undo");
            return Err(GameError::EmptyHistory);
        };

        self.board = entry.board_before;
        self.turn = self.turn.opposite();
        self.refresh_status();
        debug!(notation = %entry.mov, status = %self.status, "move undone");
        Ok(entry.mov)
    }

    /// Takes back the most recent move, returning false if there is none.
    pub fn undo(&mut self) -> bool {
        self.undo_move().is_ok()
    }

    /// Restores the standard starting position and clears the history.
    pub fn reset(&mut self) {
        *self = GameState::new();
        debug!("game reset");
    }

    fn refresh_status(&mut self) {
        self.status = evaluate_status(&self.board, self.turn, self.last_move());
    }

    /// Renders the live game as a FEN record.
    pub fn to_fen(&self) -> String {
        let mut castling = String::new();
        for color in Color::ALL {
            for side in CastleSide::ALL {
                let king_home = self
                    .board
                    .piece_at(CastleSide::king_home(color))
                    .is_some_and(|king| king.is(PieceKind::King, color) && !king.has_moved);
                let rook_home = self
                    .board
                    .piece_at(side.rook_home(color))
                    .is_some_and(|rook| rook.is(PieceKind::Rook, color) && !rook.has_moved);
                if king_home && rook_home {
                    let flag = match side {
                        CastleSide::Kingside => PieceKind::King.to_fen_char(color),
                        CastleSide::Queenside => PieceKind::Queen.to_fen_char(color),
                    };
                    castling.push(flag);
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .last_move()
            .filter(|mov| mov.is_double_pawn_step())
            .and_then(|mov| mov.from().offset(mov.piece().color.pawn_direction(), 0));

        let fen = FenRecord {
            piece_placement: self.board.placement(),
            active_color: self.turn,
            castling,
            en_passant,
            halfmove_clock: self.halfmove_clock(),
            fullmove_number: self.fullmove_number(),
        };
        fen.to_fen()
    }

    /// Halfmoves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        let quiet = self
            .history
            .moves()
            .rev()
            .take_while(|mov| !mov.is_capture() && mov.piece().kind != PieceKind::Pawn)
            .count() as u32;
        if quiet as usize == self.history.len() {
            self.start_halfmove + quiet
        } else {
            quiet
        }
    }

    /// The fullmove number, incremented after each Black move.
    pub fn fullmove_number(&self) -> u32 {
        let black_moves = self
            .history
            .moves()
            .filter(|mov| mov.piece().color == Color::Black)
            .count() as u32;
        self.start_fullmove + black_moves
    }
}
