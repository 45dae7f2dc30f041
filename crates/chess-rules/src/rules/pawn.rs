//! Pawn movement: pushes, captures, en passant and promotion.

use super::MoveRule;
use chess_core::{Board, PieceId, Square};

/// Pawn rule.
///
/// `id` is the identity the pawn kind is registered under; en passant only
/// captures pieces of that same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pawn {
    pub id: PieceId,
}

impl Pawn {
    pub const fn new(id: PieceId) -> Self {
        Pawn { id }
    }
}

impl MoveRule for Pawn {
    fn is_pseudolegal(&self, from: Square, to: Square, board: &Board) -> bool {
        let pawn = board.get(from);
        let dir = pawn.color.pawn_direction();

        // Nothing lies ahead of a pawn standing on its promotion rank.
        if from.rank == pawn.color.promotion_rank() {
            return false;
        }

        let delta = to - from;
        let target = board.get(to);

        if target.is_empty() {
            if delta == Square::new(0, dir) {
                return true;
            }
            if delta == Square::new(0, 2 * dir)
                && !pawn.moved
                && !board.is_occupied(from + Square::new(0, dir))
            {
                return true;
            }
        }

        if delta.rank == dir && delta.file.abs() == 1 {
            if target.is_opponent_of(pawn.color) {
                return true;
            }
            if target.is_empty() {
                let passed = board.get(from + Square::new(delta.file, 0));
                return passed.id == self.id
                    && passed.is_opponent_of(pawn.color)
                    && passed.special_transient;
            }
        }

        false
    }

    fn apply(&self, from: Square, to: Square, board: &mut Board) -> bool {
        let delta = to - from;

        // Diagonal step onto an empty square: en passant.
        if delta.file != 0 && !board.is_occupied(to) {
            board.clear(from + Square::new(delta.file, 0));
        }

        board.relocate(from, to);

        if delta.rank.abs() > 1 {
            let mut pawn = board.get(to);
            pawn.special_transient = true;
            board.set(to, pawn);
        }

        to.rank == 0 || to.rank == 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece};

    const PAWN: Pawn = Pawn::new(match PieceId::new(1) {
        Some(id) => id,
        None => unreachable!(),
    });

    fn pawn(color: Color) -> Piece {
        Piece::new(PAWN.id, color)
    }

    fn knight(color: Color) -> Piece {
        Piece::new(PieceId::new(3).unwrap(), color)
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn single_and_double_push() {
        let mut board = Board::EMPTY;
        board.set(sq("e2"), pawn(Color::White));
        assert!(PAWN.is_pseudolegal(sq("e2"), sq("e3"), &board));
        assert!(PAWN.is_pseudolegal(sq("e2"), sq("e4"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e2"), sq("e5"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e2"), sq("e1"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e2"), sq("e2"), &board));
    }

    #[test]
    fn black_moves_down_the_board() {
        let mut board = Board::EMPTY;
        board.set(sq("d7"), pawn(Color::Black));
        assert!(PAWN.is_pseudolegal(sq("d7"), sq("d6"), &board));
        assert!(PAWN.is_pseudolegal(sq("d7"), sq("d5"), &board));
        assert!(!PAWN.is_pseudolegal(sq("d7"), sq("d8"), &board));
    }

    #[test]
    fn pushes_are_blocked() {
        let mut board = Board::EMPTY;
        board.set(sq("e2"), pawn(Color::White));
        board.set(sq("e3"), knight(Color::Black));
        assert!(!PAWN.is_pseudolegal(sq("e2"), sq("e3"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e2"), sq("e4"), &board));

        board.clear(sq("e3"));
        board.set(sq("e4"), knight(Color::Black));
        assert!(PAWN.is_pseudolegal(sq("e2"), sq("e3"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e2"), sq("e4"), &board));
    }

    #[test]
    fn moved_pawn_cannot_double_step() {
        let mut board = Board::EMPTY;
        let mut p = pawn(Color::White);
        p.moved = true;
        board.set(sq("e3"), p);
        assert!(!PAWN.is_pseudolegal(sq("e3"), sq("e5"), &board));
    }

    #[test]
    fn diagonal_captures() {
        let mut board = Board::EMPTY;
        board.set(sq("e4"), pawn(Color::White));
        board.set(sq("d5"), knight(Color::Black));
        board.set(sq("f5"), knight(Color::White));
        assert!(PAWN.is_pseudolegal(sq("e4"), sq("d5"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e4"), sq("f5"), &board));
        assert!(!PAWN.is_pseudolegal(sq("e4"), sq("d3"), &board));
    }

    #[test]
    fn en_passant_needs_transient_flag() {
        let mut board = Board::EMPTY;
        board.set(sq("e5"), pawn(Color::White));
        let mut victim = pawn(Color::Black);
        victim.moved = true;
        board.set(sq("d5"), victim);
        assert!(!PAWN.is_pseudolegal(sq("e5"), sq("d6"), &board));

        victim.special_transient = true;
        board.set(sq("d5"), victim);
        assert!(PAWN.is_pseudolegal(sq("e5"), sq("d6"), &board));
    }

    #[test]
    fn en_passant_only_takes_pawns() {
        let mut board = Board::EMPTY;
        board.set(sq("e5"), pawn(Color::White));
        let mut other = knight(Color::Black);
        other.special_transient = true;
        board.set(sq("d5"), other);
        assert!(!PAWN.is_pseudolegal(sq("e5"), sq("d6"), &board));
    }

    #[test]
    fn apply_double_step_sets_transient() {
        let mut board = Board::EMPTY;
        board.set(sq("e2"), pawn(Color::White));
        assert!(!PAWN.apply(sq("e2"), sq("e4"), &mut board));
        let moved = board.get(sq("e4"));
        assert!(moved.moved);
        assert!(moved.special_transient);
        assert!(!board.is_occupied(sq("e2")));
    }

    #[test]
    fn apply_en_passant_clears_victim() {
        let mut board = Board::EMPTY;
        board.set(sq("e5"), pawn(Color::White));
        let mut victim = pawn(Color::Black);
        victim.special_transient = true;
        board.set(sq("d5"), victim);

        PAWN.apply(sq("e5"), sq("d6"), &mut board);
        assert!(!board.is_occupied(sq("d5")));
        assert!(!board.is_occupied(sq("e5")));
        assert_eq!(board.get(sq("d6")).id, PAWN.id);
    }

    #[test]
    fn apply_reports_promotion_on_either_edge() {
        let mut board = Board::EMPTY;
        board.set(sq("a7"), pawn(Color::White));
        assert!(PAWN.apply(sq("a7"), sq("a8"), &mut board));

        board.set(sq("h2"), pawn(Color::Black));
        assert!(PAWN.apply(sq("h2"), sq("h1"), &mut board));
    }

    #[test]
    fn pawn_on_promotion_rank_has_no_moves() {
        let mut board = Board::EMPTY;
        board.set(sq("c8"), pawn(Color::White));
        for to in Square::all() {
            assert!(!PAWN.is_pseudolegal(sq("c8"), to, &board));
        }
    }
}
