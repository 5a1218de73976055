//! Global events used for cross-system communication.

use bevy::prelude::*;

use crate::player::Gravity;

/// Sent when the player applies a pending gravity switch.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityShifted {
    /// The controller entity whose gravity changed
    pub controls: Entity,
    pub from: Gravity,
    pub to: Gravity,
}

/// Triggered exactly once per play session when the end marker is reached.
///
/// End listeners are observers of this trigger, so a listener added after
/// the level was completed never sees it.
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelCompleted {
    /// The controller entity that reached the end
    pub controls: Entity,
    /// Controller position at the moment of completion
    pub position: Vec3,
}
