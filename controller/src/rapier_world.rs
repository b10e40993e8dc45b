//! Rapier-based query world for immutable/static level geometry.
//!
//! Builds an in-memory `rapier2d` scene from a list of static collider definitions
//! and answers the resolver's ray queries through a borrowed `QueryPipeline`.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: no dynamics are ever stepped; only broad/narrow phases are initialised.
//! - Immutable world: statics do not move after construction.

// Re-export Rapier so downstream crates can use Rapier macros/types
// without needing to depend on `rapier2d` directly.
pub use rapier2d;

use nalgebra::{Point2, Unit, Vector2};
use rapier2d::prelude::*;

use crate::scene::{LayerMask, RayHit, SceneQuery};

/// Canonical definition of an immutable level collider.
///
/// Conventions
/// - Units are world units (the resolver does not care which).
/// - Geometry is axis-aligned; there is no rotation.
/// - `layers` is matched against the resolver's collision mask.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation of the collider's center.
    pub translation: Vector2<f32>,
    pub layers: LayerMask,
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes.
#[derive(Clone, Copy, Debug)]
pub enum ColliderShapeDef {
    /// Infinite floor (half-space with an upward normal).
    ///
    /// The walkable surface sits at `translation.y + offset`; everything below is solid.
    Ground { offset: f32 },

    /// Axis-aligned box with the given half-extents.
    Cuboid { half_extents: Vector2<f32> },
}

/// In-memory Rapier structures needed for scene queries against a static world.
///
/// Built once at startup and reused for every tick.
pub struct RapierQueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
}

impl RapierQueryWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN/invalid values are the
    /// caller's problem.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.iter() {
            let rb = RigidBodyBuilder::fixed().translation(def.translation).build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(def);
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        // Run collision detection only (no dynamics) so the broad-phase BVH is
        // populated and queries can run.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        let hooks = ();
        let events = ();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        log::debug!("built rapier query world with {} statics", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Create a borrowed `QueryPipeline` view for scene queries.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

impl SceneQuery for RapierQueryWorld {
    fn cast_ray(
        &self,
        origin: Point2<f32>,
        direction: Unit<Vector2<f32>>,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let on_mask = |_: ColliderHandle, collider: &Collider| layers_of(collider).intersects(mask);
        let filter = QueryFilter::only_fixed().predicate(&on_mask);
        let ray = Ray::new(origin, direction.into_inner());

        self.query_pipeline(filter)
            .cast_ray(&ray, max_distance, true)
            .map(|(_, distance)| RayHit { distance })
    }
}

/// Layer bits are stored in the low 32 bits of the collider's user data.
#[inline]
fn layers_of(collider: &Collider) -> LayerMask {
    LayerMask(collider.user_data as u32)
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose lives on the parent rigid-body, so the collider only carries a local offset.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match def.shape {
        ColliderShapeDef::Ground { offset } => {
            let halfspace = HalfSpace::new(Vector::y_axis());
            ColliderBuilder::new(SharedShape::new(halfspace)).translation(Vector::new(0.0, offset))
        }
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x.abs(), half_extents.y.abs())
        }
    };

    builder.user_data(def.layers.0 as u128).build()
}
