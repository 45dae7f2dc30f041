//! Standard chess piece set and starting layout.

use super::{King, Pawn, PieceRule, UnitMover};
use crate::registry::{PieceDef, Registry};
use chess_core::{Board, Color, PieceId};

const fn id(raw: u8) -> PieceId {
    match PieceId::new(raw) {
        Some(id) => id,
        None => panic!("standard identities fit in 4 bits"),
    }
}

pub const PAWN: PieceId = id(1);
pub const BISHOP: PieceId = id(2);
pub const KNIGHT: PieceId = id(3);
pub const ROOK: PieceId = id(4);
pub const QUEEN: PieceId = id(5);
pub const KING: PieceId = id(6);

/// The side that moves first in the standard game.
pub const FIRST_TO_MOVE: Color = Color::White;

/// Standard initial layout, a8 first. White pieces carry the team bit.
#[rustfmt::skip]
pub const INITIAL_LAYOUT: [u8; 64] = [
    0x04, 0x03, 0x02, 0x05, 0x06, 0x02, 0x03, 0x04,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
    0x14, 0x13, 0x12, 0x15, 0x16, 0x12, 0x13, 0x14,
];

/// Returns the standard starting board.
pub const fn initial_board() -> Board {
    Board::from_layout(INITIAL_LAYOUT)
}

/// Returns the six standard piece kinds.
pub fn piece_defs() -> Vec<PieceDef> {
    vec![
        PieceDef::new(PAWN, "pawn", false, PieceRule::Pawn(Pawn::new(PAWN))),
        PieceDef::new(BISHOP, "bishop", false, UnitMover::bishop().into()),
        PieceDef::new(KNIGHT, "knight", false, UnitMover::knight().into()),
        PieceDef::new(ROOK, "rook", false, UnitMover::rook().into()),
        PieceDef::new(QUEEN, "queen", false, UnitMover::queen().into()),
        PieceDef::new(KING, "king", true, King::new(ROOK).into()),
    ]
}

/// Returns a registry holding the standard piece kinds.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    for def in piece_defs() {
        registry
            .register(def)
            .expect("standard identities are distinct and non-zero");
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    #[test]
    fn registry_has_six_kinds() {
        let registry = registry();
        assert_eq!(registry.iter().count(), 6);
        assert!(registry.is_critical(KING));
        assert!(!registry.is_critical(QUEEN));
    }

    #[test]
    fn layout_places_kings_on_e_file() {
        let board = initial_board();
        let white_king = board.get(Square::from_algebraic("e1").unwrap());
        let black_king = board.get(Square::from_algebraic("e8").unwrap());
        assert_eq!(white_king.id, KING);
        assert_eq!(white_king.color, Color::White);
        assert_eq!(black_king.id, KING);
        assert_eq!(black_king.color, Color::Black);
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn white_holds_the_team_bit_and_the_high_indices() {
        assert_eq!(FIRST_TO_MOVE.bit(), 1);
        for (index, &byte) in INITIAL_LAYOUT.iter().enumerate() {
            if byte == 0 {
                continue;
            }
            let expected = if index >= 48 { Color::White } else { Color::Black };
            assert_eq!(Color::from_bit(byte >> 4), expected, "index {index}");
        }
        let board = initial_board();
        assert_eq!(board.get(Square::from_algebraic("e2").unwrap()).color, Color::White);
        assert_eq!(board.get_index(52).color, Color::White);
    }
}
