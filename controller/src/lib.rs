/*!
Raycast-based kinematic controller for axis-aligned 2D bodies.

- controller:    the collision resolver (`Controller2D::move_by`)
- player:        gravity + input driver on top of the resolver
- scene:         the `SceneQuery` seam; `block_scene` and `rapier_world` implement it
- body:          body pose seam and the default `BoxBody`
- collisions:    above/below/left/right touch state
- settings:      construction-time configuration, loadable from TOML
*/

pub mod bitmask_flags;
pub mod block_scene;
pub mod body;
pub mod collisions;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod player;
pub mod rapier_world;
pub mod scene;
pub mod settings;
pub mod types;

pub use block_scene::{Block, BlockScene};
pub use body::{BodyPose, BoxBody};
pub use collisions::{CollisionState, Side};
pub use constants::{DEFAULT_MOVE_SPEED, DEFAULT_RAY_COUNT, GRAVITY, MIN_RAY_COUNT, SKIN_WIDTH};
pub use controller::Controller2D;
pub use error::SettingsError;
pub use input::{ConstantInput, HorizontalInput, ScriptedInput};
pub use player::Player;
pub use rapier_world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
pub use scene::{LayerMask, RayHit, SceneQuery};
pub use settings::{ControllerSettings, DriverSettings, Settings};
pub use types::{Bounds, RayCast, RaycastOrigins, RaySpacing};
