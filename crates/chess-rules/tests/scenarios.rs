//! End-to-end game scenarios through the public command surface.

use chess_core::{Color, MoveKind, Piece, PieceKind, Position};
use chess_rules::{Board, GameError, GameState, GameStatus, MoveValidator};

fn sq(name: &str) -> Position {
    Position::from_algebraic(name).expect("valid square")
}

#[test]
fn test_opening_pawn_push() {
    let mut game = GameState::new();
    let from = Position::new(6, 4).unwrap();
    let to = Position::new(4, 4).unwrap();

    let outcome = game.make_move(from, to).expect("e4 is legal");
    assert_eq!(outcome.mov.notation(), "e4");
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.last_move().map(|m| m.to()), Some(to));
}

#[test]
fn test_four_move_checkmate() {
    let mut game = GameState::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
        game.make_move(sq(from), sq(to)).unwrap();
    }

    let outcome = game.make_move(sq("d8"), sq("h4")).expect("Qh4 is legal");
    assert_eq!(outcome.status, GameStatus::Checkmate);
    assert_eq!(game.status(), GameStatus::Checkmate);

    for (from, to) in [("a2", "a3"), ("e1", "f2"), ("h2", "h3")] {
        assert!(matches!(
            game.make_move(sq(from), sq(to)),
            Err(GameError::GameOver(GameStatus::Checkmate))
        ));
    }
    assert_eq!(game.move_count(), 4);
}

#[test]
fn test_pinned_rook_cannot_leave_the_rank() {
    let mut board = Board::empty();
    board.set_piece(sq("e4"), Some(Piece::new(PieceKind::King, Color::White)));
    board.set_piece(sq("d4"), Some(Piece::new(PieceKind::Rook, Color::White)));
    board.set_piece(sq("a4"), Some(Piece::new(PieceKind::Rook, Color::Black)));
    board.set_piece(sq("h8"), Some(Piece::new(PieceKind::King, Color::Black)));

    let validator = MoveValidator::new(&board);
    let rook = board.piece_at(sq("d4")).unwrap();
    assert!(!validator.is_legal_move(sq("d4"), sq("c5"), rook, None));
    assert!(!validator.is_legal_move(sq("d4"), sq("d7"), rook, None));

    let mut game = GameState::from_fen("7k/8/8/8/r2RK3/8/8/8 w - - 0 1").unwrap();
    assert_eq!(
        game.make_move(sq("d4"), sq("c5")),
        Err(GameError::IllegalMove {
            from: sq("d4"),
            to: sq("c5")
        })
    );
    assert_eq!(
        game.make_move(sq("d4"), sq("d5")),
        Err(GameError::IllegalMove {
            from: sq("d4"),
            to: sq("d5")
        })
    );
    let moves = game.legal_moves(sq("d4"));
    assert!(moves.iter().all(|pos| pos.row() == 4));
    assert!(game.make_move(sq("d4"), sq("a4")).is_ok());
}

#[test]
fn test_kingside_castling() {
    let mut game = GameState::from_fen("k7/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();

    let outcome = game.make_move(sq("e1"), sq("g1")).expect("castling is legal");
    assert_eq!(outcome.mov.notation(), "O-O");
    assert_eq!(outcome.mov.kind(), MoveKind::CastleKingside);

    let board = game.board();
    assert!(board.piece_at(sq("g1")).unwrap().is(PieceKind::King, Color::White));
    assert!(board.piece_at(sq("f1")).unwrap().is(PieceKind::Rook, Color::White));
    assert!(board.is_empty_at(sq("e1")));
    assert!(board.is_empty_at(sq("h1")));
}

#[test]
fn test_castling_refused_when_crossing_attack() {
    let mut game = GameState::from_fen("k4r2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(!game.legal_moves(sq("e1")).contains(&sq("g1")));
    assert!(matches!(
        game.make_move(sq("e1"), sq("g1")),
        Err(GameError::IllegalMove { .. })
    ));
}

#[test]
fn test_en_passant_capture() {
    let mut game = GameState::from_fen("4k3/5p2/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    game.make_move(sq("f7"), sq("f5")).unwrap();

    let outcome = game.make_move(sq("e5"), sq("f6")).expect("en passant is legal");
    assert_eq!(outcome.mov.kind(), MoveKind::EnPassant);
    assert!(game.board().is_empty_at(sq("f5")));
    assert!(game.board().piece_at(sq("f6")).is_some());
    assert!(outcome
        .captured
        .is_some_and(|p| p.is(PieceKind::Pawn, Color::Black)));
}

#[test]
fn test_promotion_to_queen() {
    let mut game = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let outcome = game.make_move(sq("a7"), sq("a8")).expect("promotion is legal");

    let piece = game.board().piece_at(sq("a8")).unwrap();
    assert_eq!(piece.kind, PieceKind::Queen);
    assert!(outcome.mov.notation().contains("=Q"));
}

#[test]
fn test_undo_after_special_moves() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let start = game.board().clone();

    game.make_move(sq("e1"), sq("c1")).unwrap();
    game.make_move(sq("e8"), sq("g8")).unwrap();
    assert_eq!(game.to_fen(), "r4rk1/8/8/8/8/8/8/2KR3R w - - 2 2");

    game.undo_move().unwrap();
    game.undo_move().unwrap();
    assert_eq!(game.board(), &start);
    assert_eq!(game.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
}

#[test]
fn test_san_game_with_history_json() {
    let mut game = GameState::new();
    for san in ["d4", "d5", "c4", "dxc4", "e3", "b5", "a4", "c6", "axb5", "cxb5", "Qf3"] {
        game.make_move_san(san).unwrap();
    }
    assert_eq!(game.move_count(), 11);

    let json = serde_json::to_value(game.moves().collect::<Vec<_>>()).unwrap();
    assert_eq!(json[3]["notation"], "dxc4");
    assert_eq!(json[3]["kind"], "capture");
    assert_eq!(json[3]["captured"]["kind"], "pawn");
    assert_eq!(json[10]["from"], "d1");
}
