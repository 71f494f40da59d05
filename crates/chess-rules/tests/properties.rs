//! Property tests over random legal games.

use chess_rules::{GameState, GameStatus, MoveValidator};
use proptest::prelude::*;

/// Plays the legal move picked by each index (modulo the move count) until
/// the choices run out or the game ends.
fn random_walk(choices: &[usize]) -> GameState {
    let mut game = GameState::new();
    for &choice in choices {
        let moves = game.all_legal_moves();
        if moves.is_empty() {
            break;
        }
        let (from, to) = moves[choice % moves.len()];
        game.make_move(from, to).expect("generated move is legal");
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn make_then_undo_restores_the_state(
        prefix in prop::collection::vec(any::<usize>(), 0..24),
        pick in any::<usize>(),
    ) {
        let mut game = random_walk(&prefix);
        let moves = game.all_legal_moves();
        prop_assume!(!moves.is_empty());

        let board = game.board().clone();
        let turn = game.turn();
        let count = game.move_count();
        let status = game.status();
        let fen = game.to_fen();

        let (from, to) = moves[pick % moves.len()];
        game.make_move(from, to).unwrap();
        prop_assert_eq!(game.turn(), turn.opposite());
        prop_assert_eq!(game.move_count(), count + 1);

        prop_assert!(game.undo());
        prop_assert_eq!(game.board(), &board);
        prop_assert_eq!(game.turn(), turn);
        prop_assert_eq!(game.move_count(), count);
        prop_assert_eq!(game.status(), status);
        prop_assert_eq!(game.to_fen(), fen);
    }

    #[test]
    fn checkmate_and_stalemate_are_exclusive(
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let game = random_walk(&choices);
        let validator = MoveValidator::new(game.board());
        let last = game.last_move();
        let mate = validator.is_checkmate(game.turn(), last);
        let stale = validator.is_stalemate(game.turn(), last);

        prop_assert!(!(mate && stale));
        prop_assert_eq!(mate, game.status() == GameStatus::Checkmate);
        prop_assert_eq!(stale, game.status() == GameStatus::Stalemate);
    }

    #[test]
    fn legal_moves_never_expose_the_king(
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let mut game = random_walk(&choices);
        let mover = game.turn();
        for (from, to) in game.all_legal_moves() {
            game.make_move(from, to).unwrap();
            let validator = MoveValidator::new(game.board());
            prop_assert!(!validator.is_king_in_check(mover));
            game.undo();
        }
    }

    #[test]
    fn rejected_moves_change_nothing(
        choices in prop::collection::vec(any::<usize>(), 0..20),
        from_row in 0u8..8, from_col in 0u8..8,
        to_row in 0u8..8, to_col in 0u8..8,
    ) {
        let mut game = random_walk(&choices);
        let from = chess_core::Position::new(from_row, from_col).unwrap();
        let to = chess_core::Position::new(to_row, to_col).unwrap();
        prop_assume!(!game.all_legal_moves().contains(&(from, to)));

        let board = game.board().clone();
        let count = game.move_count();
        prop_assert!(game.make_move(from, to).is_err());
        prop_assert_eq!(game.board(), &board);
        prop_assert_eq!(game.move_count(), count);
    }
}
