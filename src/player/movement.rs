//! First-person player movement and camera control under shifting gravity.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::gravity::{Gravity, GravityControls};
use crate::core::{GameState, GravityShifted};

/// Half the length of the capsule's straight section.
pub const PLAYER_HALF_HEIGHT: f32 = 8.0;
/// Capsule radius.
pub const PLAYER_RADIUS: f32 = 5.0;

/// Marker component for the player's camera.
#[derive(Component)]
pub struct PlayerCamera;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app
        .add_systems(OnEnter(GameState::InGame), grab_cursor)
        .add_systems(OnExit(GameState::InGame), release_cursor)
        .add_systems(
            Update,
            (
                mouse_look,
                stop_fall_on_gravity_shift,
                reorient_player,
                player_movement,
            )
            .chain()
            .run_if(in_state(GameState::InGame))
        );
}

/// Grab and hide cursor when entering gameplay.
fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Handle mouse movement for looking around.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<PlayerConfig>,
    mut player_query: Query<&mut GravityControls, With<Player>>,
) {
    // Accumulate mouse movement
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut controls) = player_query.get_single_mut() else {
        return;
    };
    if !controls.is_enabled() {
        return;
    }

    let sensitivity = config.mouse_sensitivity * 0.001;
    let y_invert = if config.invert_y { -1.0 } else { 1.0 };

    controls.look(-delta.x * sensitivity, -delta.y * sensitivity * y_invert);
}

/// Drop the speed gained along the old gravity when gravity changes.
pub fn stop_fall_on_gravity_shift(
    mut shifts: EventReader<GravityShifted>,
    mut player_query: Query<&mut MovementState, With<Player>>,
) {
    for shift in shifts.read() {
        if shift.from == shift.to {
            continue;
        }
        if let Ok(mut movement_state) = player_query.get_mut(shift.controls) {
            movement_state.vertical_velocity = 0.0;
            movement_state.is_grounded = false;
            debug!("Reset fall speed after gravity shift to {}", shift.to);
        }
    }
}

/// Ease the body toward its gravity frame and push the controller's
/// rotations onto the player and camera transforms.
pub fn reorient_player(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&mut Transform, &mut GravityControls), With<Player>>,
    mut camera_query: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    let Ok((mut transform, mut controls)) = player_query.get_single_mut() else {
        return;
    };

    if !controls.is_reoriented() {
        controls.reorient(config.reorient_speed * time.delta_secs());
    }

    transform.rotation = controls.body_rotation();

    if let Ok(mut camera_transform) = camera_query.get_single_mut() {
        camera_transform.rotation = Quat::from_rotation_x(controls.pitch);
    }
}

/// Handle WASD movement and jumping relative to the current gravity.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(
        Entity,
        &Transform,
        &GravityControls,
        &mut MovementState,
        &mut KinematicCharacterController,
    ), With<Player>>,
) {
    let Ok((player_entity, transform, controls, mut movement_state, mut controller)) = player_query.get_single_mut() else {
        return;
    };

    if !controls.is_enabled() {
        controller.translation = None;
        return;
    }

    let up = controls.up();
    controller.up = up;

    // Ground check along gravity, starting just above the capsule bottom
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - up * (PLAYER_HALF_HEIGHT + PLAYER_RADIUS - 0.5);
        let max_dist = 1.5;

        context.cast_ray(
            ray_origin,
            -up,
            max_dist,
            true,
            QueryFilter::default().exclude_collider(player_entity),
        ).is_some()
    } else {
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
        if keyboard.just_pressed(KeyCode::Space) {
            movement_state.vertical_velocity = config.jump_force;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * time.delta_secs();
    }

    // Build input direction from WASD
    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }

    // Normalize to prevent faster diagonal movement
    if direction != Vec3::ZERO {
        direction = direction.normalize();
    }

    // Body rotation keeps movement in the plane perpendicular to gravity
    let movement = controls.body_rotation() * direction;

    let speed = if keyboard.pressed(KeyCode::ShiftLeft) {
        config.move_speed * config.sprint_multiplier
    } else {
        config.move_speed
    };

    let horizontal = movement * speed * time.delta_secs();
    let vertical = up * movement_state.vertical_velocity * time.delta_secs();

    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player entity with camera.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec3,
    gravity: Gravity,
    config: &PlayerConfig,
) -> Entity {
    let controls = GravityControls::new(gravity);
    let rotation = controls.body_rotation();

    let player = commands
        .spawn((
            Player,
            MovementState::default(),
            controls,
            Transform::from_translation(position).with_rotation(rotation),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(PLAYER_HALF_HEIGHT, PLAYER_RADIUS),
            KinematicCharacterController {
                up: gravity.up(),
                offset: CharacterLength::Absolute(0.1),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(2.0)),
                ..default()
            },
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(Color::BLACK),
                ..default()
            },
            PlayerCamera,
            // Eye level relative to the body
            Transform::from_xyz(0.0, config.eye_height, 0.0),
        ));
    });

    info!("Spawned player at {} with gravity {}", position, gravity);

    player
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<GravityShifted>()
            .add_systems(Update, stop_fall_on_gravity_shift);
        app
    }

    fn falling_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                MovementState {
                    is_grounded: false,
                    vertical_velocity: -120.0,
                },
            ))
            .id()
    }

    fn shift(app: &mut App, controls: Entity, from: Gravity, to: Gravity) {
        app.world_mut().send_event(GravityShifted { controls, from, to });
        app.update();
    }

    #[test]
    fn test_gravity_shift_stops_the_fall() {
        let mut app = app();
        let player = falling_player(&mut app);

        shift(&mut app, player, Gravity::Down, Gravity::Left);

        let state = app.world().get::<MovementState>(player).unwrap();
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_same_gravity_keeps_the_fall() {
        let mut app = app();
        let player = falling_player(&mut app);

        shift(&mut app, player, Gravity::Down, Gravity::Down);

        let state = app.world().get::<MovementState>(player).unwrap();
        assert_eq!(state.vertical_velocity, -120.0);
    }
}
