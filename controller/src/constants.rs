/// Inset applied to every side of a body's bounds before ray origins are placed (world units).
///
/// Rays start this far inside the box, so a body resting flush on a surface still
/// registers the contact instead of starting its rays exactly on the surface.
pub const SKIN_WIDTH: f32 = 0.015;

/// Default number of rays fired along each axis.
pub const DEFAULT_RAY_COUNT: usize = 4;

/// There is always at least one ray at each corner of the inset box.
pub const MIN_RAY_COUNT: usize = 2;

/// Default gravity applied by the driver (units per second squared, negative is down).
pub const GRAVITY: f32 = -20.0;

/// Default horizontal speed at full input deflection (units per second).
pub const DEFAULT_MOVE_SPEED: f32 = 6.0;

/// Largest tick the driver will integrate in one go (seconds).
///
/// Long stalls (debugger, window drag) would otherwise produce a single huge
/// displacement.
pub const MAX_TICK_SECONDS: f32 = 0.125;

/// Layer mask that matches every layer.
pub const ALL_LAYERS: u32 = u32::MAX;
