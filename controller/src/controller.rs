use nalgebra::{Point2, Unit, Vector2};

use crate::{
    body::{BodyPose, BoxBody},
    collisions::CollisionState,
    scene::SceneQuery,
    settings::ControllerSettings,
    types::{Bounds, RayCast, RaycastOrigins, RaySpacing},
};

/// Raycast collision resolver for one axis-aligned body.
///
/// Every move fires a fan of parallel rays from the skin-inset box along each
/// axis of travel and clamps the displacement to the nearest hit, so the body
/// stops flush against solid geometry instead of entering it.
///
/// Algorithm (per call to [`Controller2D::move_by`]):
/// - Recompute ray origins from the current bounds, inset by `skin`.
/// - Clear the collision state.
/// - Horizontal pass if the requested x is non-zero, then vertical pass if y is non-zero.
/// - Translate the body by whatever displacement is left.
pub struct Controller2D<S, B = BoxBody> {
    scene: S,
    body: B,
    settings: ControllerSettings,
    spacing: RaySpacing,
    origins: RaycastOrigins,
    collisions: CollisionState,
    rays: Vec<RayCast>,
}

impl<S: SceneQuery, B: BodyPose> Controller2D<S, B> {
    /// Settings are normalized here once; ray spacing is derived from the body's extents.
    pub fn new(scene: S, body: B, settings: ControllerSettings) -> Self {
        let settings = settings.normalized();
        let mut controller = Self {
            scene,
            body,
            settings,
            spacing: RaySpacing::default(),
            origins: RaycastOrigins::default(),
            collisions: CollisionState::default(),
            rays: Vec::new(),
        };
        controller.recalculate_ray_spacing();
        controller
    }

    /// Re-derive ray spacing from the body's current extents.
    ///
    /// Only needed if the body's size changes after construction.
    pub fn recalculate_ray_spacing(&mut self) {
        let extents = Bounds::from_center_half_extents(Point2::origin(), self.body.half_extents());
        self.spacing = RaySpacing::new(
            &extents,
            self.settings.skin,
            self.settings.ray_count_horizontal,
            self.settings.ray_count_vertical,
        );
    }

    /// Move the body by `requested`, clamped against the scene.
    ///
    /// Returns the displacement actually applied. The collision state is
    /// rebuilt from scratch: an axis with zero displacement fires no rays and
    /// reports no contact for that tick.
    pub fn move_by(&mut self, requested: Vector2<f32>) -> Vector2<f32> {
        self.origins = RaycastOrigins::from_bounds(&self.body.bounds(), self.settings.skin);
        self.collisions.reset();
        self.rays.clear();

        let mut velocity = requested;
        // Horizontal first: vertical rays are shifted by the already-clamped x,
        // so they never start inside a wall the body is pressed against.
        if velocity.x != 0.0 {
            self.horizontal_collisions(&mut velocity);
        }
        if velocity.y != 0.0 {
            self.vertical_collisions(&mut velocity);
        }

        self.body.translate(velocity);
        velocity
    }

    fn vertical_collisions(&mut self, velocity: &mut Vector2<f32>) {
        let skin = self.settings.skin;
        let dir = velocity.y.signum();
        let mut ray_length = velocity.y.abs() + skin;
        let direction = Unit::new_unchecked(Vector2::new(0.0, dir));
        let start = if dir < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.top_left
        };

        for i in 0..self.settings.ray_count_vertical {
            // Shift by the horizontal displacement so the rays test where the body will be.
            let mut origin = start;
            origin.x += self.spacing.vertical * i as f32 + velocity.x;

            let hit = self
                .scene
                .cast_ray(origin, direction, ray_length, self.settings.collision_mask);
            self.rays.push(RayCast {
                origin,
                direction,
                length: ray_length,
                hit: hit.map(|h| h.distance),
            });

            if let Some(hit) = hit {
                velocity.y = (hit.distance - skin) * dir;
                // Later rays may only find something closer.
                ray_length = hit.distance;
                self.collisions.set_vertical(dir);
            }
        }
    }

    fn horizontal_collisions(&mut self, velocity: &mut Vector2<f32>) {
        let skin = self.settings.skin;
        let dir = velocity.x.signum();
        let mut ray_length = velocity.x.abs() + skin;
        let direction = Unit::new_unchecked(Vector2::new(dir, 0.0));
        let start = if dir < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.bottom_right
        };

        for i in 0..self.settings.ray_count_horizontal {
            let mut origin = start;
            origin.y += self.spacing.horizontal * i as f32;

            let hit = self
                .scene
                .cast_ray(origin, direction, ray_length, self.settings.collision_mask);
            self.rays.push(RayCast {
                origin,
                direction,
                length: ray_length,
                hit: hit.map(|h| h.distance),
            });

            if let Some(hit) = hit {
                velocity.x = (hit.distance - skin) * dir;
                ray_length = hit.distance;
                self.collisions.set_horizontal(dir);
            }
        }
    }

    /// Contact flags produced by the last move.
    #[inline]
    pub fn collisions(&self) -> CollisionState {
        self.collisions
    }

    /// Rays fired by the last move, horizontal pass first.
    pub fn last_rays(&self) -> impl Iterator<Item = &RayCast> + '_ {
        self.rays.iter()
    }

    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Direct access to the body, e.g. to teleport it. Call
    /// [`Controller2D::recalculate_ray_spacing`] after resizing.
    #[inline]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.body.bounds()
    }

    #[inline]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[inline]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    #[inline]
    pub fn ray_spacing(&self) -> RaySpacing {
        self.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block_scene::{Block, BlockScene},
        constants::SKIN_WIDTH,
        scene::LayerMask,
    };

    const EPS: f32 = 1.0e-5;

    /// 1x1 box whose bottom edge rests at `y = feet_y`, centered on x = 0.
    fn body_at(feet_y: f32) -> BoxBody {
        BoxBody::standing_on(Point2::new(0.0, feet_y), 1.0, 1.0)
    }

    fn floor_at(top: f32) -> Block {
        Block::new(Point2::new(-50.0, top - 1.0), Point2::new(50.0, top))
    }

    #[test]
    fn free_motion_is_unchanged() {
        let mut c = Controller2D::new(BlockScene::new(), body_at(0.0), ControllerSettings::default());
        let requested = Vector2::new(0.7, -0.3);

        let actual = c.move_by(requested);

        assert_eq!(actual, requested);
        assert!(!c.collisions().any());
        assert!((c.body().position - Point2::new(0.7, 0.2)).norm() < EPS);
    }

    #[test]
    fn downward_move_clamps_to_floor() {
        let scene = BlockScene::new().with_block(floor_at(0.0));
        let mut c = Controller2D::new(scene, body_at(0.25), ControllerSettings::default());

        let actual = c.move_by(Vector2::new(0.0, -1.0));

        // Rays start `skin` inside the box, so they hit at 0.25 + skin.
        let d = 0.25 + SKIN_WIDTH;
        assert!((actual.y - -(d - SKIN_WIDTH)).abs() < EPS);
        assert!(c.collisions().below());
        assert!(!c.collisions().above());
        assert!(c.bounds().min.y.abs() < EPS);
    }

    #[test]
    fn upward_move_clamps_to_ceiling() {
        let ceiling = Block::new(Point2::new(-5.0, 2.0), Point2::new(5.0, 3.0));
        let scene = BlockScene::new().with_block(ceiling);
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        let actual = c.move_by(Vector2::new(0.0, 5.0));

        assert!((actual.y - 1.0).abs() < EPS);
        assert!(c.collisions().above());
        assert!(!c.collisions().below());
    }

    #[test]
    fn nearest_obstacle_wins_across_rays() {
        // Lower ledge under the left rays, a taller step under the right rays.
        let scene = BlockScene::new()
            .with_block(Block::new(Point2::new(-5.0, -2.0), Point2::new(0.0, -1.0)))
            .with_block(Block::new(Point2::new(0.2, -2.0), Point2::new(5.0, -0.5)));
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        let actual = c.move_by(Vector2::new(0.0, -3.0));

        assert!((actual.y - -0.5).abs() < EPS);
        assert!(c.collisions().below());
    }

    #[test]
    fn nearest_obstacle_wins_when_it_is_hit_first() {
        // Same as above but mirrored, so the nearer surface is under the first ray.
        let scene = BlockScene::new()
            .with_block(Block::new(Point2::new(-5.0, -2.0), Point2::new(-0.2, -0.5)))
            .with_block(Block::new(Point2::new(0.0, -2.0), Point2::new(5.0, -1.0)));
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        let actual = c.move_by(Vector2::new(0.0, -3.0));

        assert!((actual.y - -0.5).abs() < EPS);
    }

    #[test]
    fn zero_axis_fires_no_rays_and_sets_no_flags() {
        let scene = BlockScene::new().with_block(floor_at(0.0));
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        // Grounded last tick.
        c.move_by(Vector2::new(0.0, -0.1));
        assert!(c.collisions().below());

        // No vertical motion: the floor goes unreported and y stays put.
        let actual = c.move_by(Vector2::new(0.2, 0.0));
        assert_eq!(actual.y, 0.0);
        assert!(!c.collisions().below());
        assert!(c.bounds().min.y.abs() < EPS);
        assert_eq!(c.last_rays().count(), c.settings().ray_count_horizontal);
    }

    #[test]
    fn zero_horizontal_axis_clears_wall_contact() {
        let wall = Block::new(Point2::new(0.5, -5.0), Point2::new(1.5, 5.0));
        let scene = BlockScene::new().with_block(wall);
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        // Flush against the wall and touching it.
        c.move_by(Vector2::new(0.1, 0.0));
        assert!(c.collisions().right());
        let x = c.bounds().max.x;

        // No horizontal motion: the wall goes unreported and x stays put.
        let actual = c.move_by(Vector2::new(0.0, -0.1));
        assert_eq!(actual.x, 0.0);
        assert!(!c.collisions().right());
        assert!(!c.collisions().left());
        assert_eq!(c.bounds().max.x, x);
        assert_eq!(c.last_rays().count(), c.settings().ray_count_vertical);
    }

    #[test]
    fn huge_ray_counts_construct() {
        let settings = ControllerSettings {
            ray_count_horizontal: usize::MAX / 2 + 2,
            ray_count_vertical: usize::MAX / 2 + 2,
            ..ControllerSettings::default()
        };
        let c = Controller2D::new(BlockScene::new(), body_at(0.0), settings);

        assert!(c.ray_spacing().horizontal.is_finite());
        assert!(c.ray_spacing().vertical.is_finite());
        assert_eq!(c.last_rays().count(), 0);
    }

    #[test]
    fn resting_body_stays_grounded_under_small_fall() {
        let scene = BlockScene::new().with_block(floor_at(0.0));
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        let actual = c.move_by(Vector2::new(0.0, -0.01));

        assert!(actual.y.abs() < EPS);
        assert!(c.collisions().below());
    }

    #[test]
    fn wall_clamps_horizontal_move() {
        // Wall face 0.5 from the inset ray origins on each side.
        let right_face = 0.5 - SKIN_WIDTH + 0.5;
        let scene = BlockScene::new()
            .with_block(Block::new(Point2::new(right_face, -5.0), Point2::new(right_face + 1.0, 5.0)))
            .with_block(Block::new(Point2::new(-right_face - 1.0, -5.0), Point2::new(-right_face, 5.0)));

        let mut c = Controller2D::new(&scene, body_at(0.0), ControllerSettings::default());
        let actual = c.move_by(Vector2::new(1.0, 0.0));
        assert!((actual.x - (0.5 - SKIN_WIDTH)).abs() < EPS);
        assert!(c.collisions().right());
        assert!(!c.collisions().left());

        let mut c = Controller2D::new(&scene, body_at(0.0), ControllerSettings::default());
        let actual = c.move_by(Vector2::new(-1.0, 0.0));
        assert!((actual.x - -(0.5 - SKIN_WIDTH)).abs() < EPS);
        assert!(c.collisions().left());
        assert!(!c.collisions().right());
    }

    #[test]
    fn pressing_into_wall_does_not_climb_it() {
        let wall = Block::new(Point2::new(0.5, 0.0), Point2::new(1.5, 5.0));
        let scene = BlockScene::new().with_block(floor_at(0.0)).with_block(wall);
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        for _ in 0..10 {
            let actual = c.move_by(Vector2::new(0.1, -0.01));
            assert!(actual.x.abs() < EPS);
            assert!(actual.y.abs() < EPS);
            assert!(c.collisions().right() && c.collisions().below());
        }
        assert!(c.bounds().min.y.abs() < EPS);
    }

    #[test]
    fn vertical_rays_lead_by_horizontal_displacement() {
        // A pillar top that is only under the body after it has moved right by 1.
        let pillar = Block::new(Point2::new(1.2, -5.0), Point2::new(2.0, -0.2));
        let scene = BlockScene::new().with_block(pillar);
        let mut c = Controller2D::new(scene, body_at(0.0), ControllerSettings::default());

        let actual = c.move_by(Vector2::new(1.0, -0.5));

        assert!((actual.y - -0.2).abs() < EPS);
        assert!((actual.x - 1.0).abs() < EPS);
        assert!(c.collisions().below());
    }

    #[test]
    fn mask_excludes_other_layers() {
        let scene = BlockScene::new().with_block(floor_at(0.0).on_layers(LayerMask::layer(2)));
        let settings = ControllerSettings {
            collision_mask: LayerMask::layer(0),
            ..ControllerSettings::default()
        };
        let mut c = Controller2D::new(scene, body_at(0.5), settings);

        let actual = c.move_by(Vector2::new(0.0, -1.0));

        assert_eq!(actual.y, -1.0);
        assert!(!c.collisions().below());
    }

    #[test]
    fn rays_are_recorded_per_pass() {
        let settings = ControllerSettings {
            ray_count_horizontal: 3,
            ray_count_vertical: 5,
            ..ControllerSettings::default()
        };
        let mut c = Controller2D::new(BlockScene::new(), body_at(0.0), settings);

        c.move_by(Vector2::new(0.1, -0.1));

        let rays: Vec<_> = c.last_rays().collect();
        assert_eq!(rays.len(), 8);
        assert!(rays[..3].iter().all(|r| r.direction.x == 1.0));
        assert!(rays[3..].iter().all(|r| r.direction.y == -1.0));
        assert!(rays.iter().all(|r| r.hit.is_none()));
    }

    #[test]
    fn spacing_is_clamped_and_spans_inset_box() {
        let settings = ControllerSettings {
            ray_count_horizontal: 0,
            ray_count_vertical: 1,
            ..ControllerSettings::default()
        };
        let c = Controller2D::new(BlockScene::new(), body_at(0.0), settings);

        let inset = 1.0 - 2.0 * SKIN_WIDTH;
        assert_eq!(c.settings().ray_count_horizontal, 2);
        assert!((c.ray_spacing().horizontal - inset).abs() < EPS);
        assert!((c.ray_spacing().vertical - inset).abs() < EPS);
    }

    #[test]
    fn resizing_body_updates_spacing() {
        let mut c = Controller2D::new(BlockScene::new(), body_at(0.0), ControllerSettings::default());
        c.body_mut().half_extents = Vector2::new(1.0, 2.0);
        c.recalculate_ray_spacing();

        let n = (c.settings().ray_count_vertical - 1) as f32;
        assert!((c.ray_spacing().vertical * n - (2.0 - 2.0 * SKIN_WIDTH)).abs() < EPS);
    }
}
