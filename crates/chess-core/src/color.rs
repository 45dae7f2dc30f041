//! Player color representation.

/// Represents the two players in chess.
///
/// The discriminant is the team bit stored in a piece's encoded byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Color {
    Black = 0,
    /// Moves first in the standard game.
    #[default]
    White = 1,
}

impl Color {
    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the team bit (1 for White, 0 for Black).
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Creates a color from a team bit. Only the lowest bit is read.
    #[inline]
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Returns the rank-index delta of a forward pawn step. Index 0 is the
    /// eighth rank, so White advances toward lower indices.
    #[inline]
    pub const fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the rank index this color's pieces start on (7 for White, 0 for Black).
    #[inline]
    pub const fn back_rank(self) -> i32 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Returns the rank this color's pawns promote on.
    #[inline]
    pub const fn promotion_rank(self) -> i32 {
        self.opposite().back_rank()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn team_bit() {
        assert_eq!(Color::White.bit(), 1);
        assert_eq!(Color::Black.bit(), 0);
        assert_eq!(Color::from_bit(1), Color::White);
        assert_eq!(Color::from_bit(0), Color::Black);
        assert_eq!(Color::from_bit(0b11), Color::White);
        assert_eq!(Color::default(), Color::White);
    }

    #[test]
    fn pawn_direction() {
        assert_eq!(Color::White.pawn_direction(), -1);
        assert_eq!(Color::Black.pawn_direction(), 1);
    }

    #[test]
    fn back_and_promotion_ranks() {
        assert_eq!(Color::White.back_rank(), 7);
        assert_eq!(Color::Black.back_rank(), 0);
        assert_eq!(Color::White.promotion_rank(), 0);
        assert_eq!(Color::Black.promotion_rank(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }
}
