/*!
Construction-time configuration for the resolver and the driver.

Settings are plain values: they are normalized once when a controller is built
and are never re-validated per tick. Both structs deserialize from TOML with
every field optional, so a config file only has to name what it overrides:

```toml
[controller]
ray_count_vertical = 6
collision_mask = 1

[driver]
gravity = -30.0
```
*/

use serde::Deserialize;

use crate::{
    constants::{DEFAULT_MOVE_SPEED, DEFAULT_RAY_COUNT, GRAVITY, MAX_TICK_SECONDS, MIN_RAY_COUNT, SKIN_WIDTH},
    error::SettingsError,
    scene::LayerMask,
};

/// Resolver settings: ray fan density, skin inset and the layers rays collide with.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Rays fired along x, spread over the height of the inset box.
    pub ray_count_horizontal: usize,
    /// Rays fired along y, spread over the width of the inset box.
    pub ray_count_vertical: usize,
    /// Inset from every side of the bounds to the ray origins.
    pub skin: f32,
    /// Only geometry on one of these layers blocks the body.
    pub collision_mask: LayerMask,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            ray_count_horizontal: DEFAULT_RAY_COUNT,
            ray_count_vertical: DEFAULT_RAY_COUNT,
            skin: SKIN_WIDTH,
            collision_mask: LayerMask::ALL,
        }
    }
}

impl ControllerSettings {
    /// Raise ray counts to the two-corner minimum and clamp the skin to a non-negative value.
    ///
    /// This is forgiving on purpose: bad counts are fixed up, not reported.
    pub fn normalized(self) -> Self {
        let mut out = self;

        if out.ray_count_horizontal < MIN_RAY_COUNT {
            log::warn!(
                "ray_count_horizontal {} raised to {}",
                out.ray_count_horizontal,
                MIN_RAY_COUNT
            );
            out.ray_count_horizontal = MIN_RAY_COUNT;
        }
        if out.ray_count_vertical < MIN_RAY_COUNT {
            log::warn!(
                "ray_count_vertical {} raised to {}",
                out.ray_count_vertical,
                MIN_RAY_COUNT
            );
            out.ray_count_vertical = MIN_RAY_COUNT;
        }
        if out.skin.is_nan() || out.skin < 0.0 {
            log::warn!("skin {} clamped to 0", out.skin);
            out.skin = 0.0;
        }

        out
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.skin.is_finite() {
            return Err(SettingsError::Invalid {
                field: "skin",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

/// Driver settings: gravity, horizontal speed and the tick clamp.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Vertical acceleration in units per second squared (negative is down).
    pub gravity: f32,
    /// Horizontal speed at full input deflection (units per second).
    pub move_speed: f32,
    /// Longest `dt` integrated by a single tick (seconds).
    pub max_tick_seconds: f32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: DEFAULT_MOVE_SPEED,
            max_tick_seconds: MAX_TICK_SECONDS,
        }
    }
}

impl DriverSettings {
    /// Replace unusable values with their defaults.
    ///
    /// A non-positive tick clamp would turn every `dt` negative and run gravity backwards.
    pub fn normalized(self) -> Self {
        let mut out = self;

        if !out.gravity.is_finite() {
            log::warn!("gravity {} reset to {}", out.gravity, GRAVITY);
            out.gravity = GRAVITY;
        }
        if !out.move_speed.is_finite() {
            log::warn!("move_speed {} reset to {}", out.move_speed, DEFAULT_MOVE_SPEED);
            out.move_speed = DEFAULT_MOVE_SPEED;
        }
        if !(out.max_tick_seconds.is_finite() && out.max_tick_seconds > 0.0) {
            log::warn!(
                "max_tick_seconds {} reset to {}",
                out.max_tick_seconds,
                MAX_TICK_SECONDS
            );
            out.max_tick_seconds = MAX_TICK_SECONDS;
        }

        out
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.gravity.is_finite() {
            return Err(SettingsError::Invalid {
                field: "gravity",
                reason: "must be finite",
            });
        }
        if !self.move_speed.is_finite() {
            return Err(SettingsError::Invalid {
                field: "move_speed",
                reason: "must be finite",
            });
        }
        if !(self.max_tick_seconds.is_finite() && self.max_tick_seconds > 0.0) {
            return Err(SettingsError::Invalid {
                field: "max_tick_seconds",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}

/// Both settings blocks, as read from a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub controller: ControllerSettings,
    pub driver: DriverSettings,
}

impl Settings {
    /// Parse, validate and normalize settings from a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, SettingsError> {
        let parsed: Settings = toml::from_str(src)?;
        parsed.controller.validate()?;
        parsed.driver.validate()?;

        Ok(Self {
            controller: parsed.controller.normalized(),
            driver: parsed.driver,
        })
    }
}
