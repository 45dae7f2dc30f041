//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine:
//! - [`Square`] for board coordinates and the offsets between them
//! - [`Piece`], [`PieceId`] and [`Color`] for the one-byte piece encoding
//! - [`Board`] for the 64-square grid of encoded pieces
//! - [`Move`] for from/to move requests

mod board;
mod color;
mod mov;
mod piece;
mod square;

pub use board::Board;
pub use color::Color;
pub use mov::{Move, MoveParseError};
pub use piece::{Piece, PieceId};
pub use square::Square;
