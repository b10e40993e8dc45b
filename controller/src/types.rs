/*!
Geometry records shared by the resolver, the bodies and the scenes.

This module contains no collision algorithms. Everything here is recomputed
from the body's pose every tick (bounds, ray origins) or at construction
(ray spacing):
- `Bounds`:         axis-aligned box with min/max corners
- `RaycastOrigins`: corners of the skin-inset box rays start from
- `RaySpacing`:     distance between neighbouring rays on each axis
- `RayCast`:        descriptor of a fired ray, kept for debug output
*/

use nalgebra::{Point2, Unit, Vector2};

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Bounds {
    #[inline]
    pub fn new(min: Point2<f32>, max: Point2<f32>) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_center_half_extents(center: Point2<f32>, half_extents: Vector2<f32>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn size(&self) -> Vector2<f32> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point2<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Shrink by `amount` on every side.
    ///
    /// An axis narrower than `2 * amount` collapses onto its center line instead
    /// of inverting.
    pub fn inset(&self, amount: f32) -> Self {
        let center = self.center();
        let half = self.size() * 0.5;
        let inset_half = Vector2::new((half.x - amount).max(0.0), (half.y - amount).max(0.0));
        Self::from_center_half_extents(center, inset_half)
    }
}

/// Corners of the inset bounds; every ray starts from one of them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
    pub bottom_right: Point2<f32>,
}

impl RaycastOrigins {
    pub fn from_bounds(bounds: &Bounds, skin: f32) -> Self {
        let b = bounds.inset(skin);
        Self {
            top_left: Point2::new(b.min.x, b.max.y),
            top_right: Point2::new(b.max.x, b.max.y),
            bottom_left: Point2::new(b.min.x, b.min.y),
            bottom_right: Point2::new(b.max.x, b.min.y),
        }
    }
}

/// Gap between neighbouring rays of each fan.
///
/// Horizontal rays (cast along x) are stacked up the side of the box, so their
/// spacing divides the inset height. Vertical rays divide the inset width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaySpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

impl RaySpacing {
    /// Both counts must already be at least 2.
    pub fn new(bounds: &Bounds, skin: f32, ray_count_horizontal: usize, ray_count_vertical: usize) -> Self {
        debug_assert!(ray_count_horizontal >= 2 && ray_count_vertical >= 2);
        let size = bounds.inset(skin).size();
        Self {
            horizontal: size.y / (ray_count_horizontal - 1) as f32,
            vertical: size.x / (ray_count_vertical - 1) as f32,
        }
    }
}

/// One ray fired during a move, with the distance it hit at (if any).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCast {
    pub origin: Point2<f32>,
    pub direction: Unit<Vector2<f32>>,
    /// Length the ray was cast with.
    pub length: f32,
    pub hit: Option<f32>,
}

impl RayCast {
    /// World-space end point of the cast segment.
    #[inline]
    pub fn end(&self) -> Point2<f32> {
        self.origin + self.direction.into_inner() * self.length
    }
}
