//! Perft (performance test) for validating the legality pipeline.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth, which
//! can be compared against published values. Every node goes through
//! [`GameState::make_move`] and [`GameState::undo_move`], so the counts cover
//! execution and undo as well as generation.

use crate::{GameError, GameState};
use tracing::trace;

/// Counts the leaf nodes at the given depth.
///
/// # Errors
///
/// Fails if a generated move is refused by [`GameState::make_move`] or
/// cannot be undone, either of which means the rules disagree with
/// themselves.
pub fn perft(game: &mut GameState, depth: u32) -> Result<u64, GameError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = game.all_legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for (from, to) in moves {
        game.make_move(from, to)?;
        nodes += perft(game, depth - 1)?;
        game.undo_move()?;
    }
    Ok(nodes)
}

/// Perft with divide: the node count below each root move.
///
/// Useful for locating which move has an incorrect count.
pub fn perft_divide(game: &mut GameState, depth: u32) -> Result<Vec<(String, u64)>, GameError> {
    let mut results = Vec::new();

    for (from, to) in game.all_legal_moves() {
        game.make_move(from, to)?;
        let nodes = if depth > 1 { perft(game, depth - 1)? } else { 1 };
        trace!(%from, %to, nodes, "perft divide");
        results.push((format!("{}{}", from, to), nodes));
        game.undo_move()?;
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&mut GameState::new(), 1), Ok(20));
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&mut GameState::new(), 2), Ok(400));
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&mut GameState::new(), 3), Ok(8902));
    }

    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&mut GameState::new(), 4), Ok(197281));
    }

    // Castling, en passant and pins all appear within two plies
    #[test]
    fn perft_kiwipete_depth_1() {
        let mut game = GameState::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&mut game, 1), Ok(48));
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let mut game = GameState::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&mut game, 2), Ok(2039));
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        let mut game = GameState::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&mut game, 3), Ok(97862));
    }

    #[test]
    fn perft_position3() {
        let mut game = GameState::from_fen(POSITION_3).unwrap();
        assert_eq!(perft(&mut game, 1), Ok(14));
        assert_eq!(perft(&mut game, 2), Ok(191));
        assert_eq!(perft(&mut game, 3), Ok(2812));
    }

    #[test]
    fn perft_leaves_the_game_untouched() {
        let mut game = GameState::from_fen(KIWIPETE).unwrap();
        let fen = game.to_fen();
        assert_eq!(perft(&mut game, 2), Ok(2039));
        assert_eq!(game.to_fen(), fen);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn perft_divide_works() {
        let mut game = GameState::new();
        let results = perft_divide(&mut game, 2).unwrap();
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(results[0].0, "a2a3");
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn perft_stops_at_a_finished_game() {
        let mut game = GameState::new();
        for san in ["f3", "e5", "g4", "Qh4"] {
            game.make_move_san(san).unwrap();
        }
        assert_eq!(perft(&mut game, 1), Ok(0));
        assert_eq!(perft(&mut game, 3), Ok(0));
        assert_eq!(perft_divide(&mut game, 2), Ok(Vec::new()));
        assert_eq!(game.move_count(), 4);
    }
}
