//! Level construction from a level definition.

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::LevelDefinition;
use super::materials::{
    bounds_material, end_marker_material, platform_material, LevelTextures, SwitchMaterials,
};
use crate::player::{spawn_player, Gravity, PlayerConfig};

/// Marker for all level geometry that should be cleaned up.
#[derive(Component)]
pub struct LevelGeometry;

/// Marker for the cube enclosing the level.
#[derive(Component)]
pub struct BoundingBox;

/// Marker for a platform block.
#[derive(Component)]
pub struct Platform;

/// A prop that offers a new gravity when looked at.
#[derive(Component, Debug, Clone, Copy)]
pub struct GravitySwitch {
    pub gravity: Gravity,
}

/// The sphere that ends the level when the player gets close.
#[derive(Component, Debug, Clone, Copy)]
pub struct EndMarker {
    pub radius: f32,
}

/// Entities that make up the current level.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    pub bounding_box: Entity,
    pub platforms: Vec<Entity>,
    pub switches: Vec<Entity>,
    pub end_marker: Entity,
    controls: Entity,
}

impl Level {
    /// The player entity carrying the gravity controller.
    pub fn controls(&self) -> Entity {
        self.controls
    }
}

/// Thickness of the invisible walls lining the bounding box.
const BOUNDS_WALL_THICKNESS: f32 = 10.0;

/// Build a level from a level definition, including the player.
pub fn build_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &LevelTextures,
    level: &LevelDefinition,
    player_config: &PlayerConfig,
    switch_color: Color,
) -> Level {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(
            level.global_ambient.color.0,
            level.global_ambient.color.1,
            level.global_ambient.color.2,
        ),
        brightness: level.global_ambient.brightness,
    });

    let bounding_box = spawn_bounding_box(commands, meshes, materials, level.bounds_size);
    let end_marker = spawn_end_marker(commands, meshes, materials, level);
    let platforms = spawn_platforms(commands, meshes, materials, textures, level);
    let switches = spawn_switches(commands, meshes, materials, textures, level, switch_color);

    let controls = spawn_player(
        commands,
        Vec3::from(level.player_start),
        level.start_gravity,
        player_config,
    );

    info!(
        "Built level '{}': {} platforms, {} switches",
        level.name,
        platforms.len(),
        switches.len()
    );

    Level {
        bounding_box,
        platforms,
        switches,
        end_marker,
        controls,
    }
}

/// Spawn the enclosing cube with a collider wall behind each inner face.
fn spawn_bounding_box(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    size: f32,
) -> Entity {
    let half = size / 2.0;
    let wall_half = BOUNDS_WALL_THICKNESS / 2.0;

    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(size, size, size))),
            MeshMaterial3d(bounds_material(materials)),
            Transform::default(),
            BoundingBox,
            LevelGeometry,
        ))
        .with_children(|parent| {
            for normal in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
                // Thin along the face normal, full size along the other two axes
                let extents = Vec3::splat(half + BOUNDS_WALL_THICKNESS) - normal.abs() * (half + wall_half);
                parent.spawn((
                    Transform::from_translation(normal * (half + wall_half)),
                    Collider::cuboid(extents.x, extents.y, extents.z),
                ));
            }
        })
        .id()
}

fn spawn_end_marker(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
) -> Entity {
    let marker = &level.end_marker;

    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(marker.radius).mesh().uv(32, 32))),
            MeshMaterial3d(end_marker_material(materials)),
            Transform::from_translation(Vec3::from(marker.position)),
            Collider::ball(marker.radius),
            Sensor,
            EndMarker { radius: marker.radius },
            LevelGeometry,
        ))
        .with_children(|parent| {
            parent.spawn(PointLight {
                color: Color::WHITE,
                intensity: marker.light_intensity,
                range: marker.light_range,
                ..default()
            });
        })
        .id()
}

fn spawn_platforms(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &LevelTextures,
    level: &LevelDefinition,
) -> Vec<Entity> {
    let size = level.platform_size;
    let mesh = meshes.add(Cuboid::new(size, size, size));
    let material = platform_material(materials, textures);

    level
        .platforms
        .iter()
        .map(|&position| {
            commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(Vec3::from(position)),
                    Collider::cuboid(size / 2.0, size / 2.0, size / 2.0),
                    Platform,
                    LevelGeometry,
                ))
                .id()
        })
        .collect()
}

/// Spawn switch cubes: crate texture on the body, an arrow quad on the -Z face.
fn spawn_switches(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &LevelTextures,
    level: &LevelDefinition,
    color: Color,
) -> Vec<Entity> {
    let size = level.switch_size;
    let half = size / 2.0;
    let body = meshes.add(Cuboid::new(size, size, size));
    let face = meshes.add(Rectangle::new(size, size));

    level
        .switches
        .iter()
        .map(|def| {
            let switch_materials = SwitchMaterials::new(materials, textures, color);
            let arrow = switch_materials.arrow_face.clone();

            commands
                .spawn((
                    Mesh3d(body.clone()),
                    MeshMaterial3d(switch_materials.crate_faces.clone()),
                    Transform::from_translation(def.translation()).with_rotation(def.rotation()),
                    Collider::cuboid(half, half, half),
                    GravitySwitch {
                        gravity: def.gravity,
                    },
                    switch_materials,
                    LevelGeometry,
                ))
                .with_children(|parent| {
                    // Slightly proud of the face to avoid z-fighting
                    parent.spawn((
                        Mesh3d(face.clone()),
                        MeshMaterial3d(arrow),
                        Transform::from_xyz(0.0, 0.0, -(half + 0.01))
                            .with_rotation(Quat::from_rotation_y(PI)),
                    ));
                })
                .id()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{GravityControls, Player};

    fn build_test_level(
        mut commands: Commands,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
    ) {
        let level = build_level(
            &mut commands,
            &mut meshes,
            &mut materials,
            &LevelTextures::default(),
            &LevelDefinition::default(),
            &PlayerConfig::default(),
            Color::WHITE,
        );
        commands.insert_resource(level);
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Startup, build_test_level);
        app.update();
        app
    }

    #[test]
    fn test_level_references_spawned_entities() {
        let mut app = app();
        let level = app.world().resource::<Level>().clone();

        assert_eq!(level.platforms.len(), 3);
        assert_eq!(level.switches.len(), 4);

        let world = app.world_mut();
        assert!(world.get::<BoundingBox>(level.bounding_box).is_some());
        assert!(world.get::<EndMarker>(level.end_marker).is_some());
        assert!(world.get::<Sensor>(level.end_marker).is_some());
        for platform in &level.platforms {
            assert!(world.get::<Platform>(*platform).is_some());
        }
        assert!(world.get::<Player>(level.controls()).is_some());

        let mut geometry = world.query_filtered::<Entity, With<LevelGeometry>>();
        // box + marker + 3 platforms + 4 switches
        assert_eq!(geometry.iter(world).count(), 9);
    }

    #[test]
    fn test_switches_carry_their_gravity_and_own_materials() {
        let mut app = app();
        let level = app.world().resource::<Level>().clone();
        let world = app.world();

        let gravities: Vec<Gravity> = level
            .switches
            .iter()
            .map(|&e| world.get::<GravitySwitch>(e).unwrap().gravity)
            .collect();
        assert_eq!(
            gravities,
            vec![Gravity::Left, Gravity::Right, Gravity::Down, Gravity::Up]
        );

        let first = world.get::<SwitchMaterials>(level.switches[0]).unwrap();
        let second = world.get::<SwitchMaterials>(level.switches[1]).unwrap();
        assert_ne!(first.crate_faces, second.crate_faces);
        assert_ne!(first.arrow_face, second.arrow_face);
    }

    #[test]
    fn test_player_starts_with_level_gravity() {
        let mut app = app();
        let level = app.world().resource::<Level>().clone();
        let controls = app.world().get::<GravityControls>(level.controls()).unwrap();
        assert_eq!(controls.gravity(), Gravity::Down);

        let transform = app.world().get::<Transform>(level.controls()).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, -130.0, 0.0));
    }
}
