//! Player plugin - movement, camera, and player-related systems.

use bevy::prelude::*;

use super::components::*;
use super::movement;

/// Player plugin - handles player movement, camera and gravity reorientation.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Config may already have been inserted from the config file
        app.init_resource::<PlayerConfig>();

        movement::setup_movement_systems(app);
    }
}
