//! Piece-set configuration.
//!
//! An [`EngineConfig`] describes a complete game variant: which side moves
//! first, the starting layout and the piece kinds. It is usually loaded from
//! a TOML file such as `config/standard.toml`:
//!
//! ```toml
//! first_to_move = "white"
//! layout = [0x04, 0x03, ...]
//!
//! [[pieces]]
//! id = 3
//! name = "knight"
//! kind = "unit"
//! offsets = [[2, 1]]
//! symmetry = ["rotate_90", "flip_y"]
//! jump = true
//! ```

use crate::registry::{PieceDef, Registry, RegistryError};
use crate::rules::{standard, King, Pawn, PieceRule, RuleError, Symmetry, UnitMover};
use crate::GameError;
use chess_core::{Board, Color, PieceId, Square};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The layout does not hold exactly 64 squares.
    #[error("layout has {0} squares, expected 64")]
    LayoutSize(usize),
    /// A piece identity is outside 1-15.
    #[error("piece identity {0} is out of range")]
    IdentityRange(u8),
    /// A piece rule could not be built.
    #[error("invalid rule for piece '{name}': {source}")]
    Rule {
        name: String,
        #[source]
        source: RuleError,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A symmetry applied to the base offsets of a unit mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryFlag {
    #[serde(rename = "rotate_90")]
    Rotate90,
    #[serde(rename = "rotate_45")]
    Rotate45,
    FlipX,
    FlipY,
}

impl From<SymmetryFlag> for Symmetry {
    fn from(flag: SymmetryFlag) -> Self {
        match flag {
            SymmetryFlag::Rotate90 => Symmetry::ROTATE_90,
            SymmetryFlag::Rotate45 => Symmetry::ROTATE_45,
            SymmetryFlag::FlipX => Symmetry::FLIP_X,
            SymmetryFlag::FlipY => Symmetry::FLIP_Y,
        }
    }
}

/// Movement rule of a configured piece kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Pawn movement; en passant only captures pawns of the same identity.
    Pawn,
    /// King movement, always critical. Castles with pieces of identity
    /// `castles_with`.
    King { castles_with: u8 },
    /// Offset-based movement.
    Unit {
        /// Base offsets as `[file, rank]` pairs.
        offsets: Vec<[i32; 2]>,
        #[serde(default)]
        symmetry: Vec<SymmetryFlag>,
        /// Slide along each direction instead of stepping once.
        #[serde(default)]
        repeat: bool,
        /// Ignore pieces standing in the way.
        #[serde(default)]
        jump: bool,
        #[serde(default)]
        critical: bool,
    },
    /// Never moves.
    Inert {
        #[serde(default)]
        critical: bool,
    },
}

/// One configured piece kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PieceConfig {
    pub id: u8,
    pub name: String,
    #[serde(flatten)]
    pub rule: RuleConfig,
}

impl PieceConfig {
    /// Builds the registry entry for this piece kind.
    pub fn to_def(&self) -> Result<PieceDef, ConfigError> {
        let id = piece_id(self.id)?;
        let (critical, rule) = match &self.rule {
            RuleConfig::Pawn => (false, PieceRule::Pawn(Pawn::new(id))),
            RuleConfig::King { castles_with } => {
                (true, PieceRule::King(King::new(piece_id(*castles_with)?)))
            }
            RuleConfig::Unit {
                offsets,
                symmetry,
                repeat,
                jump,
                critical,
            } => {
                let base: Vec<Square> = offsets.iter().map(|&[f, r]| Square::new(f, r)).collect();
                let symmetry = symmetry
                    .iter()
                    .fold(Symmetry::NONE, |acc, &flag| acc | Symmetry::from(flag));
                let rule = UnitMover::new(&base, symmetry, *repeat, *jump).map_err(|source| {
                    ConfigError::Rule {
                        name: self.name.clone(),
                        source,
                    }
                })?;
                (*critical, PieceRule::UnitMover(rule))
            }
            RuleConfig::Inert { critical } => (*critical, PieceRule::Inert),
        };
        Ok(PieceDef::new(id, self.name.clone(), critical, rule))
    }
}

fn piece_id(raw: u8) -> Result<PieceId, ConfigError> {
    PieceId::new(raw)
        .filter(|id| !id.is_empty())
        .ok_or(ConfigError::IdentityRange(raw))
}

/// A complete game variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Side that moves first. Defaults to white.
    #[serde(default)]
    pub first_to_move: Color,
    /// Encoded starting layout, a8 first and h1 last.
    pub layout: Vec<u8>,
    pub pieces: Vec<PieceConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineConfig {
    /// The standard chess set and starting position.
    pub fn standard() -> Self {
        let unit = |offsets: &[[i32; 2]], symmetry: &[SymmetryFlag], repeat: bool, jump: bool| {
            RuleConfig::Unit {
                offsets: offsets.to_vec(),
                symmetry: symmetry.to_vec(),
                repeat,
                jump,
                critical: false,
            }
        };
        let piece = |id: PieceId, name: &str, rule: RuleConfig| PieceConfig {
            id: id.raw(),
            name: name.to_string(),
            rule,
        };

        EngineConfig {
            first_to_move: standard::FIRST_TO_MOVE,
            layout: standard::INITIAL_LAYOUT.to_vec(),
            pieces: vec![
                piece(standard::PAWN, "pawn", RuleConfig::Pawn),
                piece(
                    standard::BISHOP,
                    "bishop",
                    unit(&[[1, 1]], &[SymmetryFlag::Rotate90], true, false),
                ),
                piece(
                    standard::KNIGHT,
                    "knight",
                    unit(
                        &[[2, 1]],
                        &[SymmetryFlag::Rotate90, SymmetryFlag::FlipY],
                        false,
                        true,
                    ),
                ),
                piece(
                    standard::ROOK,
                    "rook",
                    unit(&[[1, 0]], &[SymmetryFlag::Rotate90], true, false),
                ),
                piece(
                    standard::QUEEN,
                    "queen",
                    unit(&[[1, 0]], &[SymmetryFlag::Rotate45], true, false),
                ),
                piece(
                    standard::KING,
                    "king",
                    RuleConfig::King {
                        castles_with: standard::ROOK.raw(),
                    },
                ),
            ],
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Builds the piece registry and the starting board.
    ///
    /// The layout is only checked for size here; unregistered identities on
    /// the board are reported when a [`crate::Game`] is created from it.
    pub fn build(&self) -> Result<(Registry, Board), ConfigError> {
        let layout =
            Board::from_slice(&self.layout).ok_or(ConfigError::LayoutSize(self.layout.len()))?;

        let mut registry = Registry::new();
        for piece in &self.pieces {
            registry.register(piece.to_def()?)?;
        }
        tracing::debug!(pieces = self.pieces.len(), "piece set built");

        Ok((registry, layout))
    }
}
