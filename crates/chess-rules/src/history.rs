//! Executed moves paired with the board they were played on.

use crate::Board;
use chess_core::Move;

/// One executed move and the board as it stood immediately before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mov: Move,
    pub board_before: Board,
}

/// An append-only log of executed moves.
///
/// Undo restores the snapshot stored alongside the move, so no inverse move
/// logic is needed for castling, en passant or promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move with the board it was played on.
    pub fn push(&mut self, mov: Move, board_before: Board) {
        self.entries.push(HistoryEntry { mov, board_before });
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<&Move> {
        self.entries.last().map(|entry| &entry.mov)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the recorded moves, oldest first.
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = &Move> + ExactSizeIterator + '_ {
        self.entries.iter().map(|entry| &entry.mov)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, MoveKind, Piece, PieceKind, Position};

    fn pawn_push(from: &str, to: &str) -> Move {
        Move::new(
            from.parse().unwrap(),
            to.parse().unwrap(),
            Piece::new(PieceKind::Pawn, Color::White),
            MoveKind::Normal,
        )
    }

    #[test]
    fn push_and_pop() {
        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        assert!(history.last_move().is_none());

        let board = Board::standard();
        history.push(pawn_push("e2", "e4"), board.clone());
        history.push(pawn_push("d2", "d4"), Board::empty());
        assert_eq!(history.len(), 2);
        assert_eq!(history.last_move().unwrap().to(), "d4".parse::<Position>().unwrap());

        let entry = history.pop().unwrap();
        assert_eq!(entry.board_before, Board::empty());
        let entry = history.pop().unwrap();
        assert_eq!(entry.board_before, board);
        assert!(history.pop().is_none());
    }

    #[test]
    fn moves_in_order() {
        let mut history = MoveHistory::new();
        history.push(pawn_push("e2", "e4"), Board::standard());
        history.push(pawn_push("e4", "e5"), Board::standard());

        let targets: Vec<String> = history.moves().map(|m| m.to().to_string()).collect();
        assert_eq!(targets, ["e4", "e5"]);
        assert_eq!(history.entries().len(), 2);

        history.clear();
        assert!(history.is_empty());
    }
}
