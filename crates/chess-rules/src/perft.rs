//! Perft (performance test) for rules validation.
//!
//! Perft counts the leaf nodes of the move tree at a given depth. Comparing
//! the counts against known values checks the piece rules, the legality
//! filter and promotion handling together.

use crate::{Game, MoveOutcome};
use chess_core::Move;

/// Counts the leaf nodes at the given depth.
///
/// A move that promotes counts once per promotion choice.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    if depth == 1 {
        // Leaves only need the promotion check, not a full classification.
        let mut scratch = game.clone();
        return game
            .legal_moves()
            .iter()
            .map(|m| {
                let promoting = game.board().get(m.from).id;
                let probe = scratch.probe(m.from, m.to);
                if probe.promotes() {
                    game.registry().promotion_choices(promoting).len() as u64
                } else {
                    1
                }
            })
            .sum();
    }

    game.legal_moves()
        .iter()
        .map(|m| perft_move(game, m, depth))
        .sum()
}

/// Perft with divide: the node count below each legal move, sorted by move.
/// Useful for finding which move has an incorrect count.
pub fn perft_divide(game: &Game, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = game
        .legal_moves()
        .iter()
        .map(|m| (m.to_coordinate(), perft_move(game, m, depth.max(1))))
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn perft_move(game: &Game, m: Move, depth: u32) -> u64 {
    let mut child = game.clone();
    match child.attempt(m) {
        MoveOutcome::Played => perft(&child, depth - 1),
        MoveOutcome::PromotionPending => child
            .promotion_choices()
            .into_iter()
            .map(|id| {
                let mut promoted = child.clone();
                match promoted.choose_promotion(m.to, id) {
                    Ok(()) => perft(&promoted, depth - 1),
                    Err(_) => 0,
                }
            })
            .sum(),
        MoveOutcome::Rejected => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::standard;
    use chess_core::{Board, Color, Piece, Square};
    use std::sync::Arc;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Game::standard(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Game::standard(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Game::standard(), 3), 8902);
    }

    // Brute-force legality makes depth 4 slow in debug builds.
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Game::standard(), 4), 197281);
    }

    #[test]
    fn perft_depth_0_is_one() {
        assert_eq!(perft(&Game::standard(), 0), 1);
    }

    #[test]
    fn promotion_counts_every_choice() {
        let mut board = Board::EMPTY;
        board.set(sq("a1"), Piece::new(standard::KING, Color::White));
        board.set(sq("h8"), Piece::new(standard::KING, Color::Black));
        board.set(sq("d7"), Piece::new(standard::PAWN, Color::White));
        let game = Game::new(Arc::new(standard::registry()), board, Color::White).unwrap();

        // King: a2, b1, b2. Pawn: d8 with four choices.
        assert_eq!(perft(&game, 1), 3 + 4);

        let divide = perft_divide(&game, 1);
        assert_eq!(divide.iter().find(|(m, _)| m == "d7d8").map(|(_, n)| *n), Some(4));
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 7);
    }

    #[test]
    fn divide_matches_perft() {
        let game = Game::standard();
        let divide = perft_divide(&game, 2);
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|(_, n)| *n == 20));
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), perft(&game, 2));
    }
}
