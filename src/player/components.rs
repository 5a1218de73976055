//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    /// Speed along the current up vector
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// Configuration for the first-person camera controller.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y-axis for mouse look
    pub invert_y: bool,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Sprint speed multiplier
    pub sprint_multiplier: f32,
    /// Jump velocity
    pub jump_force: f32,
    /// Gravity acceleration
    pub gravity: f32,
    /// How quickly the body turns to a new gravity (higher = faster)
    pub reorient_speed: f32,
    /// Camera height above the body centre
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.5,
            invert_y: false,
            move_speed: 80.0,
            sprint_multiplier: 1.5,
            jump_force: 120.0,
            gravity: 300.0,
            reorient_speed: 6.0,
            eye_height: 8.0,
        }
    }
}
