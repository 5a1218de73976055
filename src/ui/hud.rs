//! In-game HUD - crosshair and switch prompt.

use bevy::prelude::*;

use crate::core::GameState;
use crate::interaction::PendingGravity;
use crate::player::Gravity;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the "shift gravity" prompt text.
#[derive(Component)]
pub struct SwitchPrompt;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            update_switch_prompt.run_if(in_state(GameState::InGame)),
        );
}

/// Prompt text for a pending gravity.
pub fn prompt_text(gravity: Gravity) -> String {
    format!("Press an arrow key to shift gravity {}", gravity)
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, pending: Res<PendingGravity>) {
    // Crosshair (center of screen)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });

    // Switch prompt (bottom center)
    let (text, visibility) = match pending.0 {
        Some(gravity) => (prompt_text(gravity), Visibility::Inherited),
        None => (String::new(), Visibility::Hidden),
    };
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Center,
                padding: UiRect::bottom(Val::Px(60.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(text),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.68, 0.85, 0.9)),
                visibility,
                SwitchPrompt,
            ));
        });
}

/// Show or hide the prompt as the pending gravity changes.
fn update_switch_prompt(
    pending: Res<PendingGravity>,
    mut prompt_query: Query<(&mut Text, &mut Visibility), With<SwitchPrompt>>,
) {
    if !pending.is_changed() {
        return;
    }
    let Ok((mut text, mut visibility)) = prompt_query.get_single_mut() else {
        return;
    };

    match pending.0 {
        Some(gravity) => {
            text.0 = prompt_text(gravity);
            *visibility = Visibility::Inherited;
        }
        None => {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
