//! Player module - player entity, movement, and the gravity camera controller.

mod components;
mod gravity;
mod movement;
mod plugin;

pub use components::*;
pub use gravity::{Gravity, GravityControls};
pub use movement::{spawn_player, PlayerCamera, PLAYER_HALF_HEIGHT, PLAYER_RADIUS};
pub use plugin::PlayerPlugin;
