//! Interaction module - switch proximity, gravity input, level completion.

mod end;
mod plugin;
mod switches;

pub use end::{detect_level_end, fan_directions, EndListenerExt, LevelProgress};
pub use plugin::{InteractionPlugin, InteractionSet};
pub use switches::{apply_gravity_input, update_switches, PendingGravity, GRAVITY_KEYS};
