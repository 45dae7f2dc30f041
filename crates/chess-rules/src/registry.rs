//! Piece kind registry.

use crate::rules::PieceRule;
use chess_core::PieceId;
use thiserror::Error;

/// Errors that can occur when registering piece kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("identity 0 is reserved for empty squares")]
    EmptyIdentity,

    #[error("piece identity {0} is already registered")]
    Duplicate(PieceId),
}

/// A registered piece kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDef {
    pub id: PieceId,
    pub name: String,
    /// Critical pieces (kings) must never be left attacked by their own side.
    pub critical: bool,
    pub rule: PieceRule,
}

impl PieceDef {
    pub fn new(id: PieceId, name: impl Into<String>, critical: bool, rule: PieceRule) -> Self {
        PieceDef {
            id,
            name: name.into(),
            critical,
            rule,
        }
    }
}

/// Mapping from identity (1-15) to piece kind.
///
/// Immutable once handed to a game; share it between games with an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    defs: [Option<PieceDef>; 16],
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a piece kind under its identity.
    pub fn register(&mut self, def: PieceDef) -> Result<(), RegistryError> {
        if def.id.is_empty() {
            return Err(RegistryError::EmptyIdentity);
        }
        let slot = &mut self.defs[def.id.index()];
        if slot.is_some() {
            return Err(RegistryError::Duplicate(def.id));
        }
        *slot = Some(def);
        Ok(())
    }

    /// Returns the piece kind registered under `id`.
    #[inline]
    pub fn get(&self, id: PieceId) -> Option<&PieceDef> {
        self.defs[id.index()].as_ref()
    }

    /// Returns true if `id` names a registered piece kind.
    #[inline]
    pub fn contains(&self, id: PieceId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the rule for `id`, falling back to [`PieceRule::Inert`].
    #[inline]
    pub fn rule(&self, id: PieceId) -> &PieceRule {
        self.get(id).map_or(PieceRule::INERT, |def| &def.rule)
    }

    /// Returns true if `id` names a registered critical piece kind.
    #[inline]
    pub fn is_critical(&self, id: PieceId) -> bool {
        self.get(id).is_some_and(|def| def.critical)
    }

    /// Iterates over the registered piece kinds in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &PieceDef> {
        self.defs.iter().flatten()
    }

    /// Identities a piece of kind `promoting` may be replaced with: every
    /// registered non-critical kind other than `promoting` itself.
    pub fn promotion_choices(&self, promoting: PieceId) -> Vec<PieceId> {
        self.iter()
            .filter(|def| !def.critical && def.id != promoting)
            .map(|def| def.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::standard;

    fn id(raw: u8) -> PieceId {
        PieceId::new(raw).unwrap()
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = Registry::new();
        registry
            .register(PieceDef::new(id(3), "wall", false, PieceRule::Inert))
            .unwrap();
        assert!(registry.contains(id(3)));
        assert!(!registry.contains(id(4)));
        assert_eq!(registry.get(id(3)).map(|d| d.name.as_str()), Some("wall"));
    }

    #[test]
    fn rejects_empty_identity() {
        let mut registry = Registry::new();
        let result = registry.register(PieceDef::new(PieceId::EMPTY, "none", false, PieceRule::Inert));
        assert_eq!(result, Err(RegistryError::EmptyIdentity));
    }

    #[test]
    fn rejects_duplicates() {
        let mut registry = Registry::new();
        registry
            .register(PieceDef::new(id(2), "a", false, PieceRule::Inert))
            .unwrap();
        let result = registry.register(PieceDef::new(id(2), "b", true, PieceRule::Inert));
        assert_eq!(result, Err(RegistryError::Duplicate(id(2))));
        assert_eq!(registry.get(id(2)).map(|d| d.name.as_str()), Some("a"));
    }

    #[test]
    fn unregistered_rule_is_inert() {
        assert_eq!(Registry::new().rule(id(9)), &PieceRule::Inert);
    }

    #[test]
    fn standard_promotion_choices() {
        let registry = standard::registry();
        assert_eq!(
            registry.promotion_choices(standard::PAWN),
            vec![standard::BISHOP, standard::KNIGHT, standard::ROOK, standard::QUEEN]
        );
    }
}
