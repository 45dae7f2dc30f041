//! Generic offset-based movement for bishops, knights, rooks and queens.
//!
//! A [`UnitMover`] is built from a handful of base offsets expanded by a
//! [`Symmetry`]. Each resulting direction becomes a ray: a single step, or
//! with `repeat` every multiple of the step that stays within 7 squares.
//! Sliding pieces are blocked by any occupied square earlier on the ray;
//! jumping pieces only care about the destination.

use super::{MoveRule, RuleError};
use chess_core::{Board, Square};
use std::ops::BitOr;

/// Symmetry flags used to expand base offsets into directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Symmetry(u8);

impl Symmetry {
    /// Base offsets only.
    pub const NONE: Symmetry = Symmetry(0);
    /// Add the three quarter-turn rotations of every offset.
    pub const ROTATE_90: Symmetry = Symmetry(0b0001);
    const DIAGONAL: u8 = 0b0010;
    /// Quarter-turn rotations plus the 45-degree family of every offset.
    pub const ROTATE_45: Symmetry = Symmetry(0b0011);
    /// Add the mirror image across the vertical axis (negated file).
    pub const FLIP_X: Symmetry = Symmetry(0b0100);
    /// Add the mirror image across the horizontal axis (negated rank).
    pub const FLIP_Y: Symmetry = Symmetry(0b1000);

    /// Returns true if every flag in `other` is set.
    #[inline]
    pub const fn contains(self, other: Symmetry) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Expands base offsets into the full list of directions.
    ///
    /// Rotations are applied first, mirrors second, so mirrors also reflect
    /// the rotated offsets. Duplicates are dropped, keeping first occurrence.
    pub fn expand(self, base: &[Square]) -> Vec<Square> {
        let mut moves = base.to_vec();

        if self.contains(Symmetry::ROTATE_90) {
            for &mv in base {
                moves.push(Square::new(-mv.rank, mv.file));
                moves.push(Square::new(mv.rank, -mv.file));
                moves.push(-mv);

                if self.0 & Self::DIAGONAL != 0 {
                    let dv = Square::new(mv.file - mv.rank, mv.file + mv.rank);
                    moves.push(dv);
                    moves.push(Square::new(-dv.rank, dv.file));
                    moves.push(Square::new(dv.rank, -dv.file));
                    moves.push(-dv);
                }
            }
        }

        if self.contains(Symmetry::FLIP_X) || self.contains(Symmetry::FLIP_Y) {
            let rotated = moves.len();
            for i in 0..rotated {
                let mv = moves[i];
                if self.contains(Symmetry::FLIP_X) {
                    moves.push(Square::new(-mv.file, mv.rank));
                }
                if self.contains(Symmetry::FLIP_Y) {
                    moves.push(Square::new(mv.file, -mv.rank));
                }
            }
        }

        let mut unique = Vec::with_capacity(moves.len());
        for mv in moves {
            if !unique.contains(&mv) {
                unique.push(mv);
            }
        }
        unique
    }
}

impl BitOr for Symmetry {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Symmetry(self.0 | rhs.0)
    }
}

/// Position of a relative offset on one of the rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RayStep {
    ray: usize,
    step: usize,
}

/// Offsets stay within 7 squares on each axis.
const REACH: i32 = 7;
const SIDE: usize = (2 * REACH + 1) as usize;

/// Offset-table piece rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMover {
    /// One ray per direction, ordered from the nearest offset to the farthest.
    rays: Vec<Vec<Square>>,
    /// For every offset in reach, where it sits on the rays.
    steps: Vec<Option<RayStep>>,
    can_jump: bool,
}

impl UnitMover {
    /// Builds a rule from base offsets.
    ///
    /// Every base offset and every direction produced by `symmetry` must be
    /// non-zero and within 7 squares on both axes.
    pub fn new(
        base: &[Square],
        symmetry: Symmetry,
        repeat: bool,
        can_jump: bool,
    ) -> Result<Self, RuleError> {
        if base.is_empty() {
            return Err(RuleError::NoOffsets);
        }
        let directions = symmetry.expand(base);
        for &dir in &directions {
            if dir == Square::ZERO {
                return Err(RuleError::ZeroOffset(dir));
            }
            if !Self::in_reach(dir) {
                return Err(RuleError::OffsetOutOfRange(dir));
            }
        }
        Ok(Self::from_directions(&directions, repeat, can_jump))
    }

    /// Builds the rays from directions already known to be valid.
    pub(crate) fn from_directions(directions: &[Square], repeat: bool, can_jump: bool) -> Self {
        let mut rays = Vec::with_capacity(directions.len());
        let mut steps = vec![None; SIDE * SIDE];

        for &dir in directions {
            let mut ray = Vec::new();
            let mut delta = dir;
            while Self::in_reach(delta) {
                // A later ray reaching the same offset replaces the earlier one.
                steps[Self::slot(delta)] = Some(RayStep {
                    ray: rays.len(),
                    step: ray.len(),
                });
                ray.push(delta);
                if !repeat {
                    break;
                }
                delta += dir;
            }
            rays.push(ray);
        }

        UnitMover {
            rays,
            steps,
            can_jump,
        }
    }

    /// Diagonal slider.
    pub fn bishop() -> Self {
        Self::from_directions(&Symmetry::ROTATE_90.expand(&[Square::new(1, 1)]), true, false)
    }

    /// Single (2, 1) jump in all eight orientations.
    pub fn knight() -> Self {
        let directions = (Symmetry::ROTATE_90 | Symmetry::FLIP_Y).expand(&[Square::new(2, 1)]);
        Self::from_directions(&directions, false, true)
    }

    /// Orthogonal slider.
    pub fn rook() -> Self {
        Self::from_directions(&Symmetry::ROTATE_90.expand(&[Square::new(1, 0)]), true, false)
    }

    /// Orthogonal and diagonal slider.
    pub fn queen() -> Self {
        Self::from_directions(&Symmetry::ROTATE_45.expand(&[Square::new(1, 0)]), true, false)
    }

    /// The rays, one per direction, nearest offset first.
    pub fn rays(&self) -> &[Vec<Square>] {
        &self.rays
    }

    /// Returns true if this piece ignores pieces between it and its target.
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Returns true if the offset is one this piece can travel.
    pub fn reaches(&self, delta: Square) -> bool {
        self.step(delta).is_some()
    }

    fn in_reach(delta: Square) -> bool {
        delta.file.abs() <= REACH && delta.rank.abs() <= REACH
    }

    fn slot(delta: Square) -> usize {
        ((delta.rank + REACH) as usize) * SIDE + (delta.file + REACH) as usize
    }

    fn step(&self, delta: Square) -> Option<RayStep> {
        if Self::in_reach(delta) {
            self.steps[Self::slot(delta)]
        } else {
            None
        }
    }
}

impl MoveRule for UnitMover {
    fn is_pseudolegal(&self, from: Square, to: Square, board: &Board) -> bool {
        if board.get(to).is_ally_of(board.get(from).color) {
            return false;
        }

        let Some(step) = self.step(to - from) else {
            return false;
        };

        if self.can_jump {
            return true;
        }

        self.rays[step.ray][..step.step]
            .iter()
            .all(|&offset| !board.is_occupied(from + offset))
    }
}
