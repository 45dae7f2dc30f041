//! Move representation.

use crate::Square;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing coordinate notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move: expected 4 characters like \"e2e4\", got {0:?}")]
    InvalidLength(String),

    #[error("invalid square {0:?}")]
    InvalidSquare(String),
}

/// A request to move whatever stands on `from` to `to`.
///
/// Moves carry no flags: castling, en passant and promotion are inferred by
/// the piece rules from the board they are applied to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinate(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses a move from coordinate notation.
    pub fn from_coordinate(s: &str) -> Result<Self, MoveParseError> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveParseError::InvalidLength(s.to_string()));
        }
        let square = |part: &str| {
            Square::from_algebraic(part).ok_or_else(|| MoveParseError::InvalidSquare(part.to_string()))
        };
        Ok(Move::new(square(&s[0..2])?, square(&s[2..4])?))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_coordinate(s)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
