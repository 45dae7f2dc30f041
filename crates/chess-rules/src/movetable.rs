//! Per-square table of legal destinations.

use crate::Bitboard;
use chess_core::{Move, Square};

/// For every source square, the set of destinations currently legal.
///
/// The table is rebuilt wholesale every ply; it is never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTable([Bitboard; 64]);

impl MoveTable {
    /// A table with no legal moves.
    pub const EMPTY: MoveTable = MoveTable([Bitboard::EMPTY; 64]);

    /// Legal destinations of the piece on `from`. Empty for off-board squares.
    #[inline]
    pub fn destinations(&self, from: Square) -> Bitboard {
        from.index().map_or(Bitboard::EMPTY, |i| self.0[i])
    }

    /// Returns true if moving from `from` to `to` is legal.
    #[inline]
    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.destinations(from).contains(to)
    }

    /// Records `from -> to` as legal. Off-board squares are ignored.
    #[inline]
    pub fn insert(&mut self, from: Square, to: Square) {
        if let Some(i) = from.index() {
            self.0[i].set(to);
        }
    }

    /// Total number of legal moves.
    pub fn count(&self) -> u32 {
        self.0.iter().map(|bb| bb.count()).sum()
    }

    /// Returns true if there are no legal moves.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|bb| bb.is_empty())
    }

    /// Iterates over every legal move, ordered by source then destination.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        Square::all().flat_map(move |from| {
            self.destinations(from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
    }
}

impl Default for MoveTable {
    fn default() -> Self {
        MoveTable::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn insert_and_query() {
        let mut table = MoveTable::EMPTY;
        assert!(table.is_empty());
        table.insert(sq("e2"), sq("e4"));
        table.insert(sq("e2"), sq("e3"));
        table.insert(sq("g1"), sq("f3"));

        assert!(table.contains(sq("e2"), sq("e4")));
        assert!(!table.contains(sq("e4"), sq("e2")));
        assert_eq!(table.count(), 3);
        assert_eq!(table.destinations(sq("e2")).count(), 2);
        assert!(!table.contains(Square::new(-1, 0), sq("e4")));
    }

    #[test]
    fn iterates_in_square_order() {
        let mut table = MoveTable::EMPTY;
        table.insert(sq("g1"), sq("f3"));
        table.insert(sq("b1"), sq("c3"));
        table.insert(sq("b1"), sq("a3"));
        let moves: Vec<String> = table.iter().map(|m| m.to_string()).collect();
        assert_eq!(moves, vec!["b1a3", "b1c3", "g1f3"]);
    }
}
