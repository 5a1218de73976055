//! End-of-level detection and end listeners.

use std::f32::consts::TAU;

use bevy::ecs::system::IntoObserverSystem;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::{InteractionConfig, LevelCompleted};
use crate::player::{Gravity, GravityControls, Player, PlayerConfig};
use crate::world::EndMarker;

/// Whether the current level has been completed.
#[derive(Resource, Debug, Default)]
pub struct LevelProgress {
    completed: bool,
}

impl LevelProgress {
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Directions of the end-detection fan.
///
/// The view is flattened onto the plane perpendicular to the gravity axis,
/// then turned about that axis in `rays` even steps, ending on a full turn.
/// A view parallel to the axis flattens to zero and yields zero vectors.
///
/// A fan turned about world Y in eighth turns is identical under Up and
/// Down gravity. Under Left or Right gravity a world-Y fan would tilt the
/// rays out of the walking plane, so the turn follows the gravity axis.
pub fn fan_directions(view: Vec3, gravity: Gravity, rays: u32) -> impl Iterator<Item = Vec3> {
    let axis = gravity.axis();
    let flat = view - axis * view.dot(axis);
    let step = if rays == 0 { 0.0 } else { TAU / rays as f32 };

    (1..=rays).map(move |i| Quat::from_axis_angle(axis, step * i as f32) * flat)
}

/// Complete the level once any fan ray from the eye reaches the end marker.
pub fn detect_level_end(
    mut commands: Commands,
    config: Res<InteractionConfig>,
    player_config: Res<PlayerConfig>,
    mut progress: ResMut<LevelProgress>,
    rapier_context: Query<&RapierContext>,
    mut controls_query: Query<(Entity, &Transform, &mut GravityControls), With<Player>>,
    marker_query: Query<(), With<EndMarker>>,
) {
    if progress.completed {
        return;
    }
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let Ok((entity, transform, mut controls)) = controls_query.get_single_mut() else {
        return;
    };

    let eye = controls.eye_position(transform.translation, player_config.eye_height);
    let is_marker = |hit: Entity| marker_query.contains(hit);

    let reached = fan_directions(controls.direction(), controls.gravity(), config.end_fan_rays)
        .filter_map(|direction| Dir3::new(direction).ok())
        .any(|direction| {
            context
                .cast_ray(
                    eye,
                    direction.as_vec3(),
                    config.end_reach,
                    true,
                    QueryFilter::default().predicate(&is_marker),
                )
                .is_some()
        });

    if !reached {
        return;
    }

    progress.completed = true;
    controls.dispose();

    info!("End marker reached at {}", eye);
    commands.trigger(LevelCompleted {
        controls: entity,
        position: eye,
    });
}

/// Register callbacks for level completion.
///
/// Listeners are observers, so one registered after the level was
/// completed is not invoked for that completion.
pub trait EndListenerExt {
    fn add_end_listener<B: Bundle, M>(
        &mut self,
        listener: impl IntoObserverSystem<LevelCompleted, B, M>,
    ) -> &mut Self;
}

impl EndListenerExt for App {
    fn add_end_listener<B: Bundle, M>(
        &mut self,
        listener: impl IntoObserverSystem<LevelCompleted, B, M>,
    ) -> &mut Self {
        self.add_observer(listener)
    }
}

impl EndListenerExt for Commands<'_, '_> {
    fn add_end_listener<B: Bundle, M>(
        &mut self,
        listener: impl IntoObserverSystem<LevelCompleted, B, M>,
    ) -> &mut Self {
        self.add_observer(listener);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{physics_app, spawn_collider, spawn_player_with_eye_at};
    use std::f32::consts::FRAC_PI_4;

    #[derive(Resource, Default)]
    struct EndCount(usize);

    #[derive(Resource, Default)]
    struct LateCount(usize);

    fn app() -> App {
        let mut app = physics_app();
        app.init_resource::<InteractionConfig>()
            .init_resource::<LevelProgress>()
            .init_resource::<EndCount>()
            .init_resource::<LateCount>()
            .add_systems(Update, detect_level_end)
            .add_end_listener(|_trigger: Trigger<LevelCompleted>, mut count: ResMut<EndCount>| {
                count.0 += 1;
            });
        app
    }

    /// Player with its eye at the origin, looking along -Z.
    fn spawn_player(app: &mut App, gravity: Gravity) -> Entity {
        spawn_player_with_eye_at(app, Vec3::ZERO, gravity)
    }

    fn spawn_marker(app: &mut App, position: Vec3) {
        spawn_collider(
            app,
            Transform::from_translation(position),
            (Collider::ball(10.0), Sensor, EndMarker { radius: 10.0 }),
        );
    }

    fn end_count(app: &App) -> usize {
        app.world().resource::<EndCount>().0
    }

    #[test]
    fn test_fan_has_evenly_spaced_flat_rays() {
        let view = Vec3::new(0.0, 0.6, -0.8);
        let directions: Vec<Vec3> = fan_directions(view, Gravity::Down, 8).collect();
        assert_eq!(directions.len(), 8);

        for (i, direction) in directions.iter().enumerate() {
            assert!(direction.y.abs() < 1e-5);
            assert!((direction.length() - 0.8).abs() < 1e-5);
            let next = directions[(i + 1) % 8];
            assert!((direction.angle_between(next) - FRAC_PI_4).abs() < 1e-4);
        }

        // The last ray completes the turn back onto the flattened view
        assert!(directions[7].abs_diff_eq(Vec3::new(0.0, 0.0, -0.8), 1e-5));
    }

    #[test]
    fn test_fan_zeroes_the_gravity_axis() {
        let view = Vec3::new(0.6, 0.0, -0.8);
        for direction in fan_directions(view, Gravity::Right, 8) {
            assert!(direction.x.abs() < 1e-5);
        }
    }

    #[test]
    fn test_view_along_gravity_axis_casts_nothing() {
        for direction in fan_directions(Vec3::NEG_Y, Gravity::Up, 8) {
            assert_eq!(direction, Vec3::ZERO);
            assert!(Dir3::new(direction).is_err());
        }
    }

    #[test]
    fn test_marker_beside_player_completes_level() {
        let mut app = app();
        let player = spawn_player(&mut app, Gravity::Down);
        // Facing -Z; the marker is to the side, 5 units from its surface
        spawn_marker(&mut app, Vec3::new(15.0, 0.0, 0.0));

        app.update();
        app.update();

        assert_eq!(end_count(&app), 1);
        assert!(app.world().resource::<LevelProgress>().is_completed());
        assert!(!app.world().get::<GravityControls>(player).unwrap().is_enabled());
    }

    #[test]
    fn test_fan_starts_at_the_eye() {
        let mut app = app();
        // Body at the origin, eye at (0, 8, 0). A flat ray at body height
        // passes 14 below the centre and misses; from the eye it enters
        // the sphere 7 units out.
        app.world_mut()
            .spawn((Player, Transform::default(), GravityControls::new(Gravity::Down)));
        spawn_marker(&mut app, Vec3::new(0.0, 14.0, -15.0));

        app.update();
        app.update();

        assert_eq!(end_count(&app), 1);
    }

    #[test]
    fn test_end_fires_only_once() {
        let mut app = app();
        spawn_player(&mut app, Gravity::Down);
        spawn_marker(&mut app, Vec3::new(0.0, 0.0, -15.0));

        for _ in 0..5 {
            app.update();
        }

        assert_eq!(end_count(&app), 1);
    }

    #[test]
    fn test_marker_out_of_reach() {
        let mut app = app();
        let player = spawn_player(&mut app, Gravity::Down);
        spawn_marker(&mut app, Vec3::new(25.0, 0.0, 0.0));

        app.update();
        app.update();

        assert_eq!(end_count(&app), 0);
        assert!(!app.world().resource::<LevelProgress>().is_completed());
        assert!(app.world().get::<GravityControls>(player).unwrap().is_enabled());
    }

    #[test]
    fn test_standing_inside_the_marker_completes_level() {
        let mut app = app();
        spawn_player(&mut app, Gravity::Down);
        spawn_marker(&mut app, Vec3::new(0.0, 0.0, 3.0));

        app.update();
        app.update();

        assert_eq!(end_count(&app), 1);
    }

    #[test]
    fn test_marker_along_gravity_axis_is_not_seen() {
        let mut app = app();
        spawn_player(&mut app, Gravity::Left);
        // Directly "below" the player under left gravity
        spawn_marker(&mut app, Vec3::new(-15.0, 0.0, 0.0));

        app.update();
        app.update();
        assert_eq!(end_count(&app), 0);
    }

    #[test]
    fn test_fan_turns_about_the_gravity_axis() {
        let mut app = app();
        spawn_player(&mut app, Gravity::Left);
        // Under left gravity the fan sweeps the YZ plane
        spawn_marker(&mut app, Vec3::new(0.0, 15.0, 0.0));

        app.update();
        app.update();
        assert_eq!(end_count(&app), 1);
    }

    #[test]
    fn test_late_listener_is_not_replayed() {
        let mut app = app();
        spawn_player(&mut app, Gravity::Down);
        spawn_marker(&mut app, Vec3::new(0.0, 0.0, -15.0));

        app.update();
        app.update();
        assert_eq!(end_count(&app), 1);

        app.add_end_listener(|_trigger: Trigger<LevelCompleted>, mut count: ResMut<LateCount>| {
            count.0 += 1;
        });
        app.update();
        app.update();

        assert_eq!(app.world().resource::<LateCount>().0, 0);
        assert_eq!(end_count(&app), 1);
    }
}
