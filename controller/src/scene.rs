//! The scene-query seam between the resolver and whatever holds the static geometry.

use nalgebra::{Point2, Unit, Vector2};
use serde::Deserialize;

use crate::constants::ALL_LAYERS;

/// Bitset of collision layers. A query only sees geometry sharing at least one bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(ALL_LAYERS);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask with a single layer set. Layers past 31 do not exist and give an empty mask.
    #[inline]
    pub const fn layer(layer: u32) -> Self {
        match 1u32.checked_shl(layer) {
            Some(bits) => LayerMask(bits),
            None => LayerMask::NONE,
        }
    }

    #[inline]
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// Answer to a successful ray query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the nearest surface (world units).
    pub distance: f32,
}

/// Static collision scene queried by the resolver.
///
/// Implementations must be synchronous and side-effect free. "No hit" is the
/// ordinary answer and is reported as `None`.
pub trait SceneQuery {
    /// Return the nearest surface along `direction` from `origin`, within `max_distance`.
    fn cast_ray(
        &self,
        origin: Point2<f32>,
        direction: Unit<Vector2<f32>>,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    #[inline]
    fn cast_ray(
        &self,
        origin: Point2<f32>,
        direction: Unit<Vector2<f32>>,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        (**self).cast_ray(origin, direction, max_distance, mask)
    }
}
