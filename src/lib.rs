//! Gravity Shift - a first-person gravity-switching puzzle level in Bevy.
//!
//! The player walks a box-shaped level, looks at switch crates to pick up a
//! new gravity direction and confirms it with an arrow key. Reaching the
//! glowing sphere ends the level.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, configuration
//! - **Player**: First-person controller with a settable gravity axis
//! - **World**: Level data and scene assembly
//! - **Interaction**: Switch targeting, gravity input, end detection
//! - **UI**: HUD, pause and level-complete screens
//!
//! # Assets
//!
//! Everything the game reads at runtime lives under `assets/`: the config
//! and level files in `assets/data/`, and the platform, crate and arrow
//! textures in `assets/textures/` (PNG, decoded by Bevy's default `png`
//! feature). A level file can point its `textures` at other images under
//! `assets/`.

pub mod core;
pub mod interaction;
pub mod player;
pub mod ui;
pub mod world;

#[cfg(test)]
mod test_support;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GravityShiftPlugin;

impl Plugin for GravityShiftPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Switches, gravity input and end detection
            .add_plugins(interaction::InteractionPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
