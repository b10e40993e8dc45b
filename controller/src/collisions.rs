//! Which sides of a body touched solid geometry during the last move.

use crate::{
    bitmask_flags::BitmaskFlags,
    define_bitmask_flags,
};

define_bitmask_flags!(Side, u8, {
    Above,
    Below,
    Left,
    Right,
});

/// Touch state of a body, valid until the next move.
///
/// Reset to all-false at the start of every move; each axis pass only sets the
/// sides it actually hit.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionState {
    flags: BitmaskFlags<u8>,
}

impl CollisionState {
    #[inline]
    pub fn above(&self) -> bool {
        self.flags.has(Side::Above)
    }

    #[inline]
    pub fn below(&self) -> bool {
        self.flags.has(Side::Below)
    }

    #[inline]
    pub fn left(&self) -> bool {
        self.flags.has(Side::Left)
    }

    #[inline]
    pub fn right(&self) -> bool {
        self.flags.has(Side::Right)
    }

    #[inline]
    pub fn has(&self, side: Side) -> bool {
        self.flags.has(side)
    }

    /// Touching a floor or a ceiling.
    #[inline]
    pub fn vertical(&self) -> bool {
        self.flags.has_any(&[Side::Above, Side::Below])
    }

    /// Touching a wall on either side.
    #[inline]
    pub fn horizontal(&self) -> bool {
        self.flags.has_any(&[Side::Left, Side::Right])
    }

    #[inline]
    pub fn any(&self) -> bool {
        !self.flags.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.flags.clear();
    }

    /// Record a vertical hit: `dir` is -1 when moving down, +1 when moving up.
    pub(crate) fn set_vertical(&mut self, dir: f32) {
        self.flags.set(Side::Below, dir < 0.0);
        self.flags.set(Side::Above, dir > 0.0);
    }

    /// Record a horizontal hit: `dir` is -1 when moving left, +1 when moving right.
    pub(crate) fn set_horizontal(&mut self, dir: f32) {
        self.flags.set(Side::Left, dir < 0.0);
        self.flags.set(Side::Right, dir > 0.0);
    }
}
