//! King movement, including castling.

use super::MoveRule;
use chess_core::{Board, PieceId, Square};

/// King rule.
///
/// Castling is a two-square horizontal king move toward an unmoved rook of
/// identity `castles_with` standing on the corner of the king's rank, with
/// every square between them empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct King {
    pub castles_with: PieceId,
}

impl King {
    pub const fn new(castles_with: PieceId) -> Self {
        King { castles_with }
    }

    /// Corner square of the rook a castling move toward `to` would use.
    fn rook_square(from: Square, to: Square) -> Square {
        let file = if to.file > from.file { 7 } else { 0 };
        Square::new(file, from.rank)
    }

    fn can_castle(&self, from: Square, to: Square, board: &Board) -> bool {
        let king = board.get(from);
        let rook_square = Self::rook_square(from, to);
        let rook = board.get(rook_square);

        if rook.id != self.castles_with || !rook.is_ally_of(king.color) || rook.moved {
            return false;
        }

        let step = Square::new((to.file - from.file).signum(), 0);
        let mut sq = from + step;
        while sq != rook_square {
            if board.is_occupied(sq) {
                return false;
            }
            sq += step;
        }
        true
    }
}

impl MoveRule for King {
    fn is_pseudolegal(&self, from: Square, to: Square, board: &Board) -> bool {
        if from == to {
            return false;
        }

        let king = board.get(from);
        let delta = to - from;

        if !king.moved && delta.rank == 0 && delta.file.abs() == 2 {
            return self.can_castle(from, to, board);
        }

        delta.chebyshev_norm() <= 1 && !board.get(to).is_ally_of(king.color)
    }

    fn apply(&self, from: Square, to: Square, board: &mut Board) -> bool {
        let delta = to - from;

        if delta.file.abs() < 2 {
            board.relocate(from, to);
        } else {
            // The rook may stand on the king's destination.
            let step = Square::new(delta.file.signum(), 0);
            let rook_square = Self::rook_square(from, to);
            let mut rook = board.get(rook_square);
            board.clear(rook_square);
            board.relocate(from, from + step * 2);
            rook.moved = true;
            board.set(from + step, rook);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece};

    fn id(raw: u8) -> PieceId {
        PieceId::new(raw).unwrap()
    }

    fn king_rule() -> King {
        King::new(id(4))
    }

    fn king(color: Color) -> Piece {
        Piece::new(id(6), color)
    }

    fn rook(color: Color) -> Piece {
        Piece::new(id(4), color)
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn castling_board() -> Board {
        let mut board = Board::EMPTY;
        board.set(sq("e1"), king(Color::White));
        board.set(sq("a1"), rook(Color::White));
        board.set(sq("h1"), rook(Color::White));
        board
    }

    #[test]
    fn steps_one_square_any_direction() {
        let mut board = Board::EMPTY;
        board.set(sq("d4"), king(Color::White));
        let reachable = Square::all()
            .filter(|&to| king_rule().is_pseudolegal(sq("d4"), to, &board))
            .count();
        assert_eq!(reachable, 8);
        assert!(!king_rule().is_pseudolegal(sq("d4"), sq("d6"), &board));
    }

    #[test]
    fn cannot_take_own_piece() {
        let mut board = Board::EMPTY;
        board.set(sq("d4"), king(Color::White));
        board.set(sq("d5"), rook(Color::White));
        board.set(sq("e5"), rook(Color::Black));
        assert!(!king_rule().is_pseudolegal(sq("d4"), sq("d5"), &board));
        assert!(king_rule().is_pseudolegal(sq("d4"), sq("e5"), &board));
    }

    #[test]
    fn castles_both_sides_when_clear() {
        let board = castling_board();
        assert!(king_rule().is_pseudolegal(sq("e1"), sq("g1"), &board));
        assert!(king_rule().is_pseudolegal(sq("e1"), sq("c1"), &board));
    }

    #[test]
    fn castling_blocked_by_any_piece_between() {
        let mut board = castling_board();
        board.set(sq("b1"), Piece::new(id(3), Color::White));
        assert!(!king_rule().is_pseudolegal(sq("e1"), sq("c1"), &board));
        assert!(king_rule().is_pseudolegal(sq("e1"), sq("g1"), &board));
    }

    #[test]
    fn castling_needs_unmoved_king_and_rook() {
        let mut board = castling_board();
        let mut moved_rook = rook(Color::White);
        moved_rook.moved = true;
        board.set(sq("h1"), moved_rook);
        assert!(!king_rule().is_pseudolegal(sq("e1"), sq("g1"), &board));

        let mut board = castling_board();
        let mut moved_king = king(Color::White);
        moved_king.moved = true;
        board.set(sq("e1"), moved_king);
        assert!(!king_rule().is_pseudolegal(sq("e1"), sq("g1"), &board));
        assert!(!king_rule().is_pseudolegal(sq("e1"), sq("c1"), &board));
    }

    #[test]
    fn castling_needs_own_rook_of_right_identity() {
        let mut board = castling_board();
        board.set(sq("h1"), rook(Color::Black));
        assert!(!king_rule().is_pseudolegal(sq("e1"), sq("g1"), &board));

        board.set(sq("h1"), Piece::new(id(5), Color::White));
        assert!(!king_rule().is_pseudolegal(sq("e1"), sq("g1"), &board));
    }

    #[test]
    fn apply_castle_kingside() {
        let mut board = castling_board();
        assert!(!king_rule().apply(sq("e1"), sq("g1"), &mut board));
        assert!(!board.is_occupied(sq("e1")));
        assert!(!board.is_occupied(sq("h1")));
        let k = board.get(sq("g1"));
        let r = board.get(sq("f1"));
        assert_eq!(k.id, id(6));
        assert_eq!(r.id, id(4));
        assert!(k.moved && r.moved);
    }

    #[test]
    fn apply_castle_queenside() {
        let mut board = castling_board();
        king_rule().apply(sq("e1"), sq("c1"), &mut board);
        assert_eq!(board.get(sq("c1")).id, id(6));
        assert_eq!(board.get(sq("d1")).id, id(4));
        assert!(!board.is_occupied(sq("a1")));
        assert!(!board.is_occupied(sq("b1")));
        assert!(!board.is_occupied(sq("e1")));
    }

    #[test]
    fn castle_onto_adjacent_rook_corner() {
        let mut board = Board::EMPTY;
        board.set(sq("f1"), king(Color::White));
        board.set(sq("h1"), rook(Color::White));
        assert!(king_rule().is_pseudolegal(sq("f1"), sq("h1"), &board));

        king_rule().apply(sq("f1"), sq("h1"), &mut board);
        let k = board.get(sq("h1"));
        let r = board.get(sq("g1"));
        assert_eq!(k.id, id(6));
        assert_eq!(r.id, id(4));
        assert_eq!(r.color, Color::White);
        assert!(k.moved && r.moved);
        assert!(!board.is_occupied(sq("f1")));
        assert_eq!(board.pieces().count(), 2);
    }

    #[test]
    fn apply_normal_move() {
        let mut board = castling_board();
        king_rule().apply(sq("e1"), sq("e2"), &mut board);
        assert!(board.get(sq("e2")).moved);
        assert!(!board.get(sq("h1")).moved);
    }
}
