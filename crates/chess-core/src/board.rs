//! The 64-square byte board.

use crate::{Piece, Square};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign};

/// A fixed 8x8 grid of encoded pieces, indexed `rank * 8 + file`.
///
/// `Board` is a plain value: copying it yields a fully independent snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; 64]);

impl Board {
    /// A board with every square empty.
    pub const EMPTY: Board = Board([0; 64]);

    /// Creates a board from 64 encoded bytes in board-index order.
    #[inline]
    pub const fn from_layout(layout: [u8; 64]) -> Self {
        Board(layout)
    }

    /// Creates a board from a slice, returning `None` unless it holds 64 bytes.
    pub fn from_slice(layout: &[u8]) -> Option<Self> {
        let bytes: [u8; 64] = layout.try_into().ok()?;
        Some(Board(bytes))
    }

    /// Returns the encoded bytes in board-index order.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Returns the piece at a linear index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 64`.
    #[inline]
    pub fn get_index(&self, index: usize) -> Piece {
        Piece::decode(self.0[index])
    }

    /// Stores a piece at a linear index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 64`.
    #[inline]
    pub fn set_index(&mut self, index: usize, piece: Piece) {
        self.0[index] = piece.encode();
    }

    /// Returns the piece on a square.
    ///
    /// # Panics
    ///
    /// Panics if `square` is off the board. Rules must bounds-check deltas
    /// before reaching the board; use [`Board::try_get`] when probing.
    #[inline]
    pub fn get(&self, square: Square) -> Piece {
        Piece::decode(self.0[Self::checked_index(square)])
    }

    /// Returns the piece on a square, or `None` when off the board.
    #[inline]
    pub fn try_get(&self, square: Square) -> Option<Piece> {
        square.index().map(|i| Piece::decode(self.0[i]))
    }

    /// Stores a piece on a square.
    ///
    /// # Panics
    ///
    /// Panics if `square` is off the board.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.0[Self::checked_index(square)] = piece.encode();
    }

    /// Empties a square.
    ///
    /// # Panics
    ///
    /// Panics if `square` is off the board.
    #[inline]
    pub fn clear(&mut self, square: Square) {
        self.set(square, Piece::EMPTY);
    }

    /// Returns true if the square holds a piece.
    ///
    /// # Panics
    ///
    /// Panics if `square` is off the board.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        !self.get(square).is_empty()
    }

    /// ANDs every byte of the board with `mask`.
    #[inline]
    pub fn mask_all(&mut self, mask: u8) {
        for byte in &mut self.0 {
            *byte &= mask;
        }
    }

    /// Moves the piece on `from` to `to`, marking it moved and leaving `from` empty.
    ///
    /// Whatever stood on `to` is overwritten.
    pub fn relocate(&mut self, from: Square, to: Square) {
        let mut piece = self.get(from);
        piece.moved = true;
        self.set(to, piece);
        self.clear(from);
    }

    /// Iterates over every occupied square together with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .map(|sq| (sq, self.get(sq)))
            .filter(|(_, p)| !p.is_empty())
    }

    fn checked_index(square: Square) -> usize {
        match square.index() {
            Some(i) => i,
            None => panic!("board access off the board at {}", square),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::EMPTY
    }
}

impl BitAnd<u8> for Board {
    type Output = Self;
    #[inline]
    fn bitand(mut self, rhs: u8) -> Self::Output {
        self.mask_all(rhs);
        self
    }
}

impl BitAndAssign<u8> for Board {
    #[inline]
    fn bitand_assign(&mut self, rhs: u8) {
        self.mask_all(rhs);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        for rank in 0..8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8 {
                write!(f, " {:02x}", self.0[rank * 8 + file])?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a  b  c  d  e  f  g  h)")
    }
}
