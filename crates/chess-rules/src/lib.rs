//! Data-driven chess rules engine.
//!
//! This crate provides:
//! - [`rules`] - per-piece movement rules ([`rules::Pawn`], [`rules::King`],
//!   [`rules::UnitMover`]) and the standard piece set
//! - [`Registry`] - the mapping from piece identity to rule and criticality
//! - [`Game`] - legality by simulation, check detection, promotion and the
//!   game phase
//! - [`EngineConfig`] - TOML-loadable piece sets and layouts
//! - [`perft`] - move-tree node counts for validating the rules
//!
//! # Example
//!
//! ```
//! use chess_core::{Move, Square};
//! use chess_rules::{Game, GamePhase, MoveOutcome};
//!
//! let mut game = Game::standard();
//! assert_eq!(game.legal_moves().count(), 20);
//!
//! let outcome = game.attempt("e2e4".parse::<Move>().unwrap());
//! assert_eq!(outcome, MoveOutcome::Played);
//! assert_eq!(game.phase(), GamePhase::InProgress);
//!
//! // The pawn that just moved two squares can be captured en passant next turn.
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert!(game.board().get(e4).special_transient);
//! ```

mod bitboard;
mod config;
mod game;
mod movetable;
mod perft;
mod registry;
pub mod rules;

pub use bitboard::Bitboard;
pub use config::{ConfigError, EngineConfig, PieceConfig, RuleConfig, SymmetryFlag};
pub use game::{Game, GameError, GamePhase, GameState, MoveOutcome, Probe};
pub use movetable::MoveTable;
pub use perft::{perft, perft_divide};
pub use registry::{PieceDef, Registry, RegistryError};
