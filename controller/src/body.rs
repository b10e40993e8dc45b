use nalgebra::{Point2, Vector2};

use crate::types::Bounds;

/// Pose of the body the resolver moves.
///
/// The resolver reads `bounds()` at the start of every move and calls
/// `translate()` exactly once with the resolved displacement.
pub trait BodyPose {
    /// Current world-space bounds.
    fn bounds(&self) -> Bounds;

    /// Fixed half-extents of the box; ray spacing is derived from them.
    fn half_extents(&self) -> Vector2<f32>;

    fn translate(&mut self, delta: Vector2<f32>);
}

/// Axis-aligned box centered on `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxBody {
    pub position: Point2<f32>,
    pub half_extents: Vector2<f32>,
}

impl BoxBody {
    #[inline]
    pub fn new(position: Point2<f32>, half_extents: Vector2<f32>) -> Self {
        Self {
            position,
            half_extents: half_extents.abs(),
        }
    }

    /// Box of `width` x `height` whose bottom edge is centered on `feet`.
    #[inline]
    pub fn standing_on(feet: Point2<f32>, width: f32, height: f32) -> Self {
        let half = Vector2::new(width.abs() * 0.5, height.abs() * 0.5);
        Self::new(Point2::new(feet.x, feet.y + half.y), half)
    }
}

impl BodyPose for BoxBody {
    #[inline]
    fn bounds(&self) -> Bounds {
        Bounds::from_center_half_extents(self.position, self.half_extents)
    }

    #[inline]
    fn half_extents(&self) -> Vector2<f32> {
        self.half_extents
    }

    #[inline]
    fn translate(&mut self, delta: Vector2<f32>) {
        self.position += delta;
    }
}
