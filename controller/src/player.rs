use nalgebra::{Point2, Vector2};

use crate::{
    body::{BodyPose, BoxBody},
    collisions::CollisionState,
    controller::Controller2D,
    input::HorizontalInput,
    scene::SceneQuery,
    settings::DriverSettings,
};

/// Kinematic body driver: velocity, gravity and input on top of a [`Controller2D`].
///
/// Grounded is not stored anywhere; it is whatever the last move reported for
/// the bottom side. Gravity keeps pulling every tick, so a body at rest keeps
/// firing downward rays and stays grounded.
pub struct Player<S, B = BoxBody> {
    controller: Controller2D<S, B>,
    settings: DriverSettings,
    velocity: Vector2<f32>,
}

impl<S: SceneQuery, B: BodyPose> Player<S, B> {
    /// Driver settings are normalized here once, like the controller's.
    pub fn new(controller: Controller2D<S, B>, settings: DriverSettings) -> Self {
        Self {
            controller,
            settings: settings.normalized(),
            velocity: Vector2::zeros(),
        }
    }

    /// Advance one simulation tick of `dt_seconds`.
    ///
    /// Steps
    /// 0) Clamp `dt` into `[0, max_tick_seconds]`.
    /// 1) Drop vertical velocity if the last move hit a floor or a ceiling.
    /// 2) Horizontal velocity = clamped input * move speed.
    /// 3) Integrate gravity.
    /// 4) Resolve `velocity * dt` against the scene.
    ///
    /// Returns the displacement actually applied.
    pub fn tick(&mut self, dt_seconds: f32, input: &mut impl HorizontalInput) -> Vector2<f32> {
        let dt = self.clamp_dt(dt_seconds);

        if self.controller.collisions().vertical() {
            self.velocity.y = 0.0;
        }

        let axis = input.axis();
        let axis = if axis.is_nan() { 0.0 } else { axis.clamp(-1.0, 1.0) };
        self.velocity.x = axis * self.settings.move_speed;

        self.velocity.y += self.settings.gravity * dt;

        let actual = self.controller.move_by(self.velocity * dt);
        self.trace_rays();
        actual
    }

    fn clamp_dt(&self, dt_seconds: f32) -> f32 {
        if dt_seconds.is_nan() || dt_seconds <= 0.0 {
            return 0.0;
        }
        if dt_seconds > self.settings.max_tick_seconds {
            log::debug!(
                "tick of {:.4}s clamped to {:.4}s",
                dt_seconds,
                self.settings.max_tick_seconds
            );
            return self.settings.max_tick_seconds;
        }
        dt_seconds
    }

    fn trace_rays(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        for ray in self.controller.last_rays() {
            log::trace!(
                "ray from ({:.3}, {:.3}) dir ({}, {}) len {:.3} hit {:?}",
                ray.origin.x,
                ray.origin.y,
                ray.direction.x,
                ray.direction.y,
                ray.length,
                ray.hit
            );
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    /// Overwrite the current velocity, e.g. for a jump impulse or knockback.
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vector2<f32>) {
        self.velocity = velocity;
    }

    /// Whether the last tick ended standing on something.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.controller.collisions().below()
    }

    #[inline]
    pub fn collisions(&self) -> CollisionState {
        self.controller.collisions()
    }

    /// Center of the body's bounds.
    #[inline]
    pub fn position(&self) -> Point2<f32> {
        self.controller.bounds().center()
    }

    #[inline]
    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    #[inline]
    pub fn controller(&self) -> &Controller2D<S, B> {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut Controller2D<S, B> {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block_scene::{Block, BlockScene},
        input::ConstantInput,
        settings::ControllerSettings,
    };

    const EPS: f32 = 1.0e-5;
    const DT: f32 = 1.0 / 60.0;

    fn player_in(scene: BlockScene, feet: Point2<f32>) -> Player<BlockScene> {
        let body = BoxBody::standing_on(feet, 1.0, 1.0);
        let controller = Controller2D::new(scene, body, ControllerSettings::default());
        Player::new(controller, DriverSettings::default())
    }

    fn floor() -> Block {
        Block::new(Point2::new(-50.0, -1.0), Point2::new(50.0, 0.0))
    }

    #[test]
    fn gravity_accumulates_in_free_fall() {
        let mut player = player_in(BlockScene::new(), Point2::new(0.0, 10.0));
        let mut idle = ConstantInput(0.0);

        player.tick(DT, &mut idle);
        player.tick(DT, &mut idle);

        assert!((player.velocity().y - 2.0 * -20.0 * DT).abs() < EPS);
        assert!(!player.is_grounded());
    }

    #[test]
    fn landing_resets_vertical_velocity_next_tick() {
        let mut player = player_in(BlockScene::new().with_block(floor()), Point2::new(0.0, 0.0));
        let mut idle = ConstantInput(0.0);
        player.set_velocity(Vector2::new(0.0, -15.0));

        player.tick(DT, &mut idle);
        assert!(player.is_grounded());

        player.tick(DT, &mut idle);
        assert!((player.velocity().y - -20.0 * DT).abs() < EPS);
        assert!(player.is_grounded());
    }

    #[test]
    fn ceiling_bump_cancels_upward_speed() {
        let ceiling = Block::new(Point2::new(-5.0, 1.05), Point2::new(5.0, 2.0));
        let mut player = player_in(BlockScene::new().with_block(ceiling), Point2::new(0.0, 0.0));
        let mut idle = ConstantInput(0.0);
        player.set_velocity(Vector2::new(0.0, 10.0));

        player.tick(DT, &mut idle);
        assert!(player.collisions().above());

        player.tick(DT, &mut idle);
        assert!((player.velocity().y - -20.0 * DT).abs() < EPS);
        assert!(!player.collisions().above());
    }

    #[test]
    fn input_is_scaled_and_clamped() {
        let mut player = player_in(BlockScene::new(), Point2::new(0.0, 10.0));

        player.tick(DT, &mut ConstantInput(0.5));
        assert!((player.velocity().x - 3.0).abs() < EPS);

        let actual = player.tick(DT, &mut ConstantInput(-4.0));
        assert!((player.velocity().x - -6.0).abs() < EPS);
        assert!((actual.x - -6.0 * DT).abs() < EPS);

        player.tick(DT, &mut ConstantInput(f32::NAN));
        assert_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn long_ticks_are_clamped() {
        let mut player = player_in(BlockScene::new(), Point2::new(0.0, 100.0));
        let max = player.settings().max_tick_seconds;

        player.tick(5.0, &mut ConstantInput(0.0));

        assert!((player.velocity().y - -20.0 * max).abs() < EPS);
    }

    #[test]
    fn negative_tick_clamp_does_not_reverse_gravity() {
        let body = BoxBody::standing_on(Point2::new(0.0, 5.0), 1.0, 1.0);
        let controller = Controller2D::new(BlockScene::new(), body, ControllerSettings::default());
        let mut player = Player::new(
            controller,
            DriverSettings {
                max_tick_seconds: -0.1,
                ..DriverSettings::default()
            },
        );
        let before = player.position();

        for _ in 0..10 {
            player.tick(DT, &mut ConstantInput(0.0));
        }

        assert!(player.settings().max_tick_seconds > 0.0);
        assert!((player.velocity().y - 10.0 * -20.0 * DT).abs() < 1.0e-4);
        assert!(player.position().y < before.y);
        // Free fall for 1/6 s covers about 0.3 units, not 11.
        assert!(before.y - player.position().y < 0.5);
    }

    #[test]
    fn non_positive_dt_does_not_move() {
        let mut player = player_in(BlockScene::new(), Point2::new(0.0, 3.0));
        let before = player.position();

        let actual = player.tick(-1.0, &mut ConstantInput(1.0));

        assert_eq!(actual, Vector2::zeros());
        assert_eq!(player.position(), before);
    }
}
