//! Sets of squares packed into a 64-bit word.
//!
//! The engine keeps legal destinations and attacked critical pieces as
//! bitboards.

use chess_core::Square;
use std::fmt;
use std::ops::BitOr;

/// A set of on-board squares. Bit `rank * 8 + file` stands for the square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Wraps raw bits.
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// The set holding only `sq`, or nothing if `sq` is off the board.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        match sq.index() {
            Some(i) => Bitboard(1 << i),
            None => Bitboard::EMPTY,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & Self::from_square(sq).0 != 0
    }

    /// Adds `sq`. Off-board squares are ignored.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        *self = *self | Self::from_square(sq);
    }

    /// Removes `sq`.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !Self::from_square(sq).0;
    }

    /// Removes and returns the lowest-indexed square.
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let index = self.0.trailing_zeros() as usize;
        let sq = Square::from_index(index)?;
        self.0 &= self.0 - 1;
        Some(sq)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Bitboard::EMPTY;
        for sq in iter {
            set.set(sq);
        }
        set
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares: Vec<String> = self.into_iter().map(Square::to_algebraic).collect();
        write!(f, "Bitboard[{}]", squares.join(" "))
    }
}

/// Iterator over the squares of a [`Bitboard`], lowest index first.
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        Squares(self)
    }
}
