//! Chess piece representation.
//!
//! A piece is stored on the board as a single byte:
//!
//! | bits | field                                  |
//! |------|----------------------------------------|
//! | 0-3  | identity (0 = empty square)            |
//! | 4    | team ([`Color`] bit)                   |
//! | 5    | moved since the game started           |
//! | 6    | transient special flag (one ply)       |
//! | 7    | permanent special flag                 |

use crate::Color;
use std::fmt;

/// Identity of a registered piece kind (1-15), or 0 for an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PieceId(u8);

impl PieceId {
    /// The identity reserved for empty squares.
    pub const EMPTY: PieceId = PieceId(0);

    /// Largest identity that fits in the 4-bit field.
    pub const MAX: u8 = 15;

    /// Creates an identity, returning `None` if it does not fit in 4 bits.
    #[inline]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= Self::MAX {
            Some(PieceId(raw))
        } else {
            None
        }
    }

    /// Returns the raw identity value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the identity as an array index (0-15).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the empty-square sentinel.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A decoded view over one encoded board byte.
///
/// When `id` is [`PieceId::EMPTY`] every other field is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub moved: bool,
    pub special_transient: bool,
    pub special_permanent: bool,
}

impl Piece {
    /// Mask of the identity field.
    pub const ID_MASK: u8 = 0b0000_1111;
    /// Mask of the team bit.
    pub const TEAM: u8 = 0b0001_0000;
    /// Mask of the moved flag.
    pub const MOVED: u8 = 0b0010_0000;
    /// Mask of the transient special flag.
    pub const SPECIAL_TRANSIENT: u8 = 0b0100_0000;
    /// Mask of the permanent special flag.
    pub const SPECIAL_PERMANENT: u8 = 0b1000_0000;

    /// The empty square.
    pub const EMPTY: Piece = Piece::decode(0);

    /// Creates an unmoved piece with no special flags.
    #[inline]
    pub const fn new(id: PieceId, color: Color) -> Self {
        Piece {
            id,
            color,
            moved: false,
            special_transient: false,
            special_permanent: false,
        }
    }

    /// Unpacks an encoded byte.
    #[inline]
    pub const fn decode(byte: u8) -> Self {
        Piece {
            id: PieceId(byte & Self::ID_MASK),
            color: Color::from_bit(byte >> 4),
            moved: byte & Self::MOVED != 0,
            special_transient: byte & Self::SPECIAL_TRANSIENT != 0,
            special_permanent: byte & Self::SPECIAL_PERMANENT != 0,
        }
    }

    /// Packs this piece into its byte encoding.
    #[inline]
    pub const fn encode(self) -> u8 {
        (self.special_permanent as u8) << 7
            | (self.special_transient as u8) << 6
            | (self.moved as u8) << 5
            | self.color.bit() << 4
            | self.id.0
    }

    /// Returns true if this is the empty square.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.id.is_empty()
    }

    /// Returns true if this is a piece belonging to `color`.
    #[inline]
    pub fn is_ally_of(self, color: Color) -> bool {
        !self.is_empty() && self.color == color
    }

    /// Returns true if this is a piece belonging to the opponent of `color`.
    #[inline]
    pub fn is_opponent_of(self, color: Color) -> bool {
        !self.is_empty() && self.color != color
    }

    /// Returns this piece with a different identity, keeping its team only.
    #[inline]
    pub const fn with_identity(self, id: PieceId) -> Self {
        Piece::new(id, self.color)
    }
}

impl From<u8> for Piece {
    fn from(byte: u8) -> Self {
        Piece::decode(byte)
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> Self {
        piece.encode()
    }
}
