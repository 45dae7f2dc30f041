//! Board square representation.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A square on the chess board, or an offset between two squares.
///
/// Both components are plain integers so that delta arithmetic may step off
/// the board; use [`Square::is_on_board`] before touching a board with it.
/// On-board squares map to linear indices `rank * 8 + file`. Rank index 0
/// is the eighth rank, so indices follow FEN reading order:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square {
    pub file: i32,
    pub rank: i32,
}

impl Square {
    /// The zero offset.
    pub const ZERO: Square = Square::new(0, 0);

    /// Creates a square (or offset) from file and rank.
    #[inline]
    pub const fn new(file: i32, rank: i32) -> Self {
        Square { file, rank }
    }

    /// Creates a square from a linear index (0-63).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Square::new((index % 8) as i32, (index / 8) as i32))
        } else {
            None
        }
    }

    /// Returns true if this square lies on the 8x8 board.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        0 <= self.file && self.file < 8 && 0 <= self.rank && self.rank < 8
    }

    /// Returns the linear index (0-63), or `None` when off the board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some((self.rank * 8 + self.file) as usize)
        } else {
            None
        }
    }

    /// Chebyshev (king-move) length of this offset.
    #[inline]
    pub fn chebyshev_norm(self) -> i32 {
        self.file.abs().max(self.rank.abs())
    }

    /// Iterates over all 64 on-board squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square::new((file - b'a') as i32, (b'8' - rank) as i32))
    }

    /// Returns the algebraic notation for this square.
    ///
    /// Off-board values are rendered as their raw components.
    pub fn to_algebraic(self) -> String {
        if self.is_on_board() {
            let file = (b'a' + self.file as u8) as char;
            let rank = (b'8' - self.rank as u8) as char;
            format!("{}{}", file, rank)
        } else {
            format!("({}, {})", self.file, self.rank)
        }
    }
}

impl Add for Square {
    type Output = Square;

    #[inline]
    fn add(self, rhs: Square) -> Self::Output {
        Square::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl AddAssign for Square {
    #[inline]
    fn add_assign(&mut self, rhs: Square) {
        self.file += rhs.file;
        self.rank += rhs.rank;
    }
}

impl Sub for Square {
    type Output = Square;

    #[inline]
    fn sub(self, rhs: Square) -> Self::Output {
        Square::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

impl Neg for Square {
    type Output = Square;

    #[inline]
    fn neg(self) -> Self::Output {
        Square::new(-self.file, -self.rank)
    }
}

impl Mul<i32> for Square {
    type Output = Square;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Square::new(self.file * rhs, self.rank * rhs)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
