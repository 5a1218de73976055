//! Interaction plugin - switch targeting, gravity input and end detection.

use bevy::prelude::*;

use super::end::{detect_level_end, LevelProgress};
use super::switches::{apply_gravity_input, update_switches, PendingGravity};
use crate::core::{GameState, InteractionConfig};

/// Per-frame interaction order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InteractionSet {
    /// Pick the switch under the crosshair
    Switches,
    /// Apply pending gravity on key press
    Input,
    /// Check whether the end was reached
    End,
}

/// Interaction plugin - runs the level's per-frame interaction checks.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<InteractionConfig>()
            .init_resource::<PendingGravity>()
            .init_resource::<LevelProgress>()

            .configure_sets(
                Update,
                (
                    InteractionSet::Switches,
                    InteractionSet::Input,
                    InteractionSet::End,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            .add_systems(Update, update_switches.in_set(InteractionSet::Switches))
            .add_systems(Update, apply_gravity_input.in_set(InteractionSet::Input))
            .add_systems(Update, detect_level_end.in_set(InteractionSet::End))

            // A rebuilt level starts fresh
            .add_systems(OnEnter(GameState::Loading), reset_interaction_state);
    }
}

fn reset_interaction_state(
    mut pending: ResMut<PendingGravity>,
    mut progress: ResMut<LevelProgress>,
) {
    *pending = PendingGravity::default();
    *progress = LevelProgress::default();
}
