//! World plugin - level loading and scene assembly.

use bevy::prelude::*;

use crate::core::{GameState, InteractionConfig};
use crate::player::{Player, PlayerConfig};

use super::builder::{build_level, Level, LevelGeometry};
use super::data::LevelDefinition;
use super::materials::LevelTextures;

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        // Loaded eagerly: the initial OnEnter(Loading) can run before Startup
        app.insert_resource(LevelDefinition::load())
            .add_systems(
                OnEnter(GameState::Loading),
                (cleanup_level, load_textures, setup_level).chain(),
            );
    }
}

/// Start loading the level's textures.
fn load_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    level: Res<LevelDefinition>,
) {
    commands.insert_resource(LevelTextures::load(&asset_server, &level.textures));
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level_definition: Res<LevelDefinition>,
    textures: Option<Res<LevelTextures>>,
    player_config: Res<PlayerConfig>,
    interaction_config: Res<InteractionConfig>,
) {
    info!("Building level: {}", level_definition.name);

    let default_textures = LevelTextures::default();
    let textures = textures.as_deref().unwrap_or(&default_textures);

    let level = build_level(
        &mut commands,
        &mut meshes,
        &mut materials,
        textures,
        &level_definition,
        &player_config,
        interaction_config.idle(),
    );

    commands.insert_resource(level);
}

/// Remove the previous level, if any, before building a fresh one.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, With<LevelGeometry>>,
    player_query: Query<Entity, With<Player>>,
) {
    let mut removed = 0;
    for entity in level_query.iter().chain(player_query.iter()) {
        commands.entity(entity).despawn_recursive();
        removed += 1;
    }
    if removed > 0 {
        debug!("Despawned {} entities from the previous level", removed);
        commands.remove_resource::<Level>();
    }
}
