//! Gravity directions and the first-person gravity controller.

use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

/// One of four directions "down" can point in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Gravity {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Gravity {
    pub const ALL: [Gravity; 4] = [Gravity::Up, Gravity::Down, Gravity::Left, Gravity::Right];

    /// Unit vector things fall along.
    pub fn direction(self) -> Vec3 {
        match self {
            Gravity::Up => Vec3::Y,
            Gravity::Down => Vec3::NEG_Y,
            Gravity::Left => Vec3::NEG_X,
            Gravity::Right => Vec3::X,
        }
    }

    /// The world axis this gravity acts on, as a positive unit vector.
    pub fn axis(self) -> Vec3 {
        match self {
            Gravity::Up | Gravity::Down => Vec3::Y,
            Gravity::Left | Gravity::Right => Vec3::X,
        }
    }

    /// Which way the player's head points under this gravity.
    pub fn up(self) -> Vec3 {
        -self.direction()
    }

    pub fn label(self) -> &'static str {
        match self {
            Gravity::Up => "UP",
            Gravity::Down => "DOWN",
            Gravity::Left => "LEFT",
            Gravity::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First-person controller state: look angles plus a gravity-aligned frame.
///
/// The body rotation is `orientation * yaw`, where `orientation` maps world
/// +Y onto the current up vector. Changing gravity re-targets the
/// orientation by the shortest arc, and `orientation` then eases toward it.
#[derive(Component, Debug, Clone)]
pub struct GravityControls {
    gravity: Gravity,
    /// Rotation about the local up axis, radians
    pub yaw: f32,
    /// Rotation about the local right axis, radians
    pub pitch: f32,
    orientation: Quat,
    target_orientation: Quat,
    enabled: bool,
}

impl GravityControls {
    /// Pitch limit, about 80 degrees.
    pub const MAX_PITCH: f32 = 1.4;

    pub fn new(gravity: Gravity) -> Self {
        let orientation = Quat::from_rotation_arc(Vec3::Y, gravity.up());
        Self {
            gravity,
            yaw: 0.0,
            pitch: 0.0,
            orientation,
            target_orientation: orientation,
            enabled: true,
        }
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn up(&self) -> Vec3 {
        self.gravity.up()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch to a new gravity, keeping the current facing. Returns the previous gravity.
    pub fn set_gravity(&mut self, gravity: Gravity) -> Gravity {
        let previous = self.gravity;
        if gravity == previous {
            return previous;
        }

        let current_up = self.target_orientation * Vec3::Y;
        let arc = Quat::from_rotation_arc(current_up, gravity.up());
        self.target_orientation = (arc * self.target_orientation).normalize();
        self.gravity = gravity;
        previous
    }

    /// Stop responding to look, movement and gravity input.
    pub fn dispose(&mut self) {
        self.enabled = false;
    }

    /// Add mouse-look deltas, clamping pitch.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    /// Ease the gravity frame toward its target. `t` is clamped to [0, 1].
    pub fn reorient(&mut self, t: f32) {
        if self.is_reoriented() {
            self.orientation = self.target_orientation;
            return;
        }
        self.orientation = self.orientation.slerp(self.target_orientation, t.clamp(0.0, 1.0));
    }

    pub fn is_reoriented(&self) -> bool {
        self.orientation.angle_between(self.target_orientation) < 1e-3
    }

    /// Rotation of the player body (gravity frame + yaw).
    pub fn body_rotation(&self) -> Quat {
        self.orientation * Quat::from_rotation_y(self.yaw)
    }

    /// Rotation of the camera in world space.
    pub fn view_rotation(&self) -> Quat {
        self.body_rotation() * Quat::from_rotation_x(self.pitch)
    }

    /// World-space look direction.
    pub fn direction(&self) -> Vec3 {
        self.view_rotation() * Vec3::NEG_Z
    }

    /// Camera position for a body at `body`, with the eye `eye_height`
    /// above it along the body's current up.
    pub fn eye_position(&self, body: Vec3, eye_height: f32) -> Vec3 {
        body + self.body_rotation() * Vec3::Y * eye_height
    }
}

impl Default for GravityControls {
    fn default() -> Self {
        Self::new(Gravity::Down)
    }
}
