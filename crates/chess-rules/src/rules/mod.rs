//! Per-piece movement rules.
//!
//! Every registered piece kind carries a [`PieceRule`], a closed set of rule
//! variants dispatched through the [`MoveRule`] contract. Rules look only at
//! the board they are given: they know nothing about check, turn order or
//! which identity their own piece was registered under beyond what they
//! were constructed with.

mod king;
mod pawn;
pub mod standard;
mod unit_mover;

pub use king::King;
pub use pawn::Pawn;
pub use unit_mover::{Symmetry, UnitMover};

use chess_core::{Board, Square};
use thiserror::Error;

/// Errors raised while constructing a rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("a unit mover needs at least one offset")]
    NoOffsets,

    #[error("offset {0:?} does not move the piece")]
    ZeroOffset(Square),

    #[error("offset {0:?} reaches further than 7 squares on an axis")]
    OffsetOutOfRange(Square),
}

/// Movement contract shared by every piece kind.
pub trait MoveRule {
    /// Returns true if the piece on `from` may move to `to` on this board,
    /// following its geometry, blocking and capture rules. Check is not
    /// considered. Returns false when `from == to`.
    ///
    /// Both squares must be on the board.
    fn is_pseudolegal(&self, from: Square, to: Square, board: &Board) -> bool;

    /// Performs a move already known to be pseudolegal and returns true if
    /// the moved piece must now be replaced through a promotion choice.
    fn apply(&self, from: Square, to: Square, board: &mut Board) -> bool {
        board.relocate(from, to);
        false
    }
}

/// The movement rule of one piece kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PieceRule {
    Pawn(Pawn),
    King(King),
    UnitMover(UnitMover),
    /// Never moves. Also stands in for identities with no registered rule.
    #[default]
    Inert,
}

impl PieceRule {
    /// Shared fallback for identities missing from a registry.
    pub(crate) const INERT: &'static PieceRule = &PieceRule::Inert;
}

impl MoveRule for PieceRule {
    #[inline]
    fn is_pseudolegal(&self, from: Square, to: Square, board: &Board) -> bool {
        match self {
            PieceRule::Pawn(rule) => rule.is_pseudolegal(from, to, board),
            PieceRule::King(rule) => rule.is_pseudolegal(from, to, board),
            PieceRule::UnitMover(rule) => rule.is_pseudolegal(from, to, board),
            PieceRule::Inert => false,
        }
    }

    #[inline]
    fn apply(&self, from: Square, to: Square, board: &mut Board) -> bool {
        match self {
            PieceRule::Pawn(rule) => rule.apply(from, to, board),
            PieceRule::King(rule) => rule.apply(from, to, board),
            PieceRule::UnitMover(rule) => rule.apply(from, to, board),
            PieceRule::Inert => {
                board.relocate(from, to);
                false
            }
        }
    }
}

impl From<Pawn> for PieceRule {
    fn from(rule: Pawn) -> Self {
        PieceRule::Pawn(rule)
    }
}

impl From<King> for PieceRule {
    fn from(rule: King) -> Self {
        PieceRule::King(rule)
    }
}

impl From<UnitMover> for PieceRule {
    fn from(rule: UnitMover) -> Self {
        PieceRule::UnitMover(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece, PieceId};

    #[test]
    fn inert_never_moves_but_relocates() {
        let mut board = Board::EMPTY;
        let from = Square::new(2, 2);
        let to = Square::new(2, 3);
        board.set(from, Piece::new(PieceId::new(9).unwrap(), Color::White));

        assert!(!PieceRule::Inert.is_pseudolegal(from, to, &board));
        assert!(!PieceRule::Inert.apply(from, to, &mut board));
        assert!(!board.is_occupied(from));
        assert!(board.get(to).moved);
    }
}
