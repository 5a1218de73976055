//! UI plugin - HUD, pause menu and level-complete screen.

use bevy::prelude::*;

use crate::core::GameState;
use super::hud;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Pause menu
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(OnExit(GameState::Paused), cleanup_menu::<PauseMenuUi>)

            // Level complete
            .add_systems(OnEnter(GameState::LevelComplete), setup_level_complete)
            .add_systems(OnExit(GameState::LevelComplete), cleanup_menu::<LevelCompleteUi>)

            .add_systems(
                Update,
                menu_input.run_if(in_state(GameState::Paused).or(in_state(GameState::LevelComplete))),
            );
    }
}

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for level-complete UI entities.
#[derive(Component)]
struct LevelCompleteUi;

/// Marker for menu buttons.
#[derive(Component)]
enum MenuButton {
    Resume,
    PlayAgain,
    Quit,
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Helper to spawn a full-screen overlay with a title and buttons.
fn spawn_overlay<M: Component>(
    commands: &mut Commands,
    marker: M,
    title: &str,
    background: Color,
    buttons: Vec<(&str, MenuButton)>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(background),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            for (label, button) in buttons {
                spawn_menu_button(parent, label, button);
            }
        });
}

/// Set up the pause menu.
fn setup_pause_menu(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        PauseMenuUi,
        "PAUSED",
        Color::srgba(0.0, 0.0, 0.0, 0.7),
        vec![("Resume", MenuButton::Resume), ("Quit", MenuButton::Quit)],
    );
}

/// Set up the level-complete screen.
fn setup_level_complete(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        LevelCompleteUi,
        "LEVEL COMPLETE",
        Color::srgba(0.05, 0.05, 0.08, 0.85),
        vec![("Play Again", MenuButton::PlayAgain), ("Quit", MenuButton::Quit)],
    );
}

/// Handle menu button interactions.
fn menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = Color::srgb(0.3, 0.3, 0.35).into();
                match button {
                    MenuButton::Resume => {
                        next_state.set(GameState::InGame);
                    }
                    MenuButton::PlayAgain => {
                        next_state.set(GameState::Loading);
                    }
                    MenuButton::Quit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = Color::srgb(0.25, 0.25, 0.3).into();
            }
            Interaction::None => {
                *bg_color = Color::srgb(0.15, 0.15, 0.2).into();
            }
        }
    }
}

/// Clean up menu entities with the given marker.
fn cleanup_menu<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
