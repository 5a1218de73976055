//! Headless app setup shared by system tests.

use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy_rapier3d::prelude::*;

use crate::player::{Gravity, GravityControls, Player, PlayerConfig};

/// A windowless app with assets, states and Rapier physics.
///
/// Colliders are registered with the physics world in `PostUpdate`, so a
/// freshly spawned collider is only visible to ray casts from the next
/// update on.
pub fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        HierarchyPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        StatesPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
    ))
    .init_asset::<Mesh>()
    .init_asset::<Image>()
    .init_asset::<StandardMaterial>()
    .init_resource::<ButtonInput<KeyCode>>()
    .init_resource::<PlayerConfig>();
    app
}

/// Spawn a player whose eye sits at `eye`, looking along -Z.
pub fn spawn_player_with_eye_at(app: &mut App, eye: Vec3, gravity: Gravity) -> Entity {
    let eye_height = app.world().resource::<PlayerConfig>().eye_height;
    let controls = GravityControls::new(gravity);
    let body = eye - controls.up() * eye_height;

    app.world_mut()
        .spawn((Player, Transform::from_translation(body), controls))
        .id()
}

/// Spawn a static collider with its global transform already in place.
pub fn spawn_collider(app: &mut App, transform: Transform, bundle: impl Bundle) -> Entity {
    app.world_mut()
        .spawn((transform, GlobalTransform::from(transform), bundle))
        .id()
}
