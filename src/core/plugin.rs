//! Core plugin that sets up game states, events, and config loading.

use bevy::prelude::*;

use super::config::insert_game_config;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, LevelComplete)
/// - Global events (GravityShifted, LevelCompleted)
/// - Config loading and basic game flow systems
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Loaded eagerly: the initial OnEnter(Loading) can run before Startup
        insert_game_config(app);

        app
            .init_state::<GameState>()

            .add_event::<GravityShifted>()

            // The world plugin builds the level on entering Loading; once
            // those commands are applied we can start playing.
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            )

            .add_observer(enter_level_complete);
    }
}

/// Transition from Loading to InGame.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

/// Show the level-complete screen once the end is reached.
fn enter_level_complete(
    trigger: Trigger<LevelCompleted>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("Level complete at {:?}", trigger.event().position);
    next_state.set(GameState::LevelComplete);
}
