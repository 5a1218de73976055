//! Switch targeting and arrow-key gravity changes.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::{GravityShifted, InteractionConfig};
use crate::player::{Gravity, GravityControls, Player, PlayerConfig};
use crate::world::{GravitySwitch, SwitchMaterials};

/// Gravity offered by the switch currently under the crosshair.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingGravity(pub Option<Gravity>);

/// Keys that confirm a pending gravity change.
pub const GRAVITY_KEYS: [KeyCode; 4] = [
    KeyCode::ArrowLeft,
    KeyCode::ArrowUp,
    KeyCode::ArrowRight,
    KeyCode::ArrowDown,
];

/// Highlight the nearest switch along the view ray and remember its gravity.
///
/// The ray leaves the camera, `eye_height` above the body, and only
/// switch colliders can stop it.
pub fn update_switches(
    config: Res<InteractionConfig>,
    player_config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    controls_query: Query<(&Transform, &GravityControls), With<Player>>,
    switch_query: Query<(Entity, &GravitySwitch, &SwitchMaterials)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pending: ResMut<PendingGravity>,
) {
    let target = match (rapier_context.get_single(), controls_query.get_single()) {
        (Ok(context), Ok((transform, controls))) => {
            let eye = controls.eye_position(transform.translation, player_config.eye_height);
            let is_switch = |hit: Entity| switch_query.contains(hit);

            context
                .cast_ray(
                    eye,
                    controls.direction(),
                    config.switch_reach,
                    true,
                    QueryFilter::default().predicate(&is_switch),
                )
                .and_then(|(entity, _)| switch_query.get(entity).ok())
                .map(|(entity, switch, _)| (entity, switch.gravity))
        }
        _ => None,
    };

    let (idle, highlight) = (config.idle(), config.highlight());
    for (entity, _, switch_materials) in switch_query.iter() {
        let color = match target {
            Some((hit, _)) if hit == entity => highlight,
            _ => idle,
        };
        switch_materials.paint(&mut materials, color);
    }

    let offered = target.map(|(_, gravity)| gravity);
    if pending.set_if_neq(PendingGravity(offered)) {
        match offered {
            Some(gravity) => debug!("Switch in reach offers gravity {}", gravity),
            None => debug!("No switch in reach"),
        }
    }
}

/// Apply the pending gravity when an arrow key is pressed.
pub fn apply_gravity_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pending: ResMut<PendingGravity>,
    mut controls_query: Query<(Entity, &mut GravityControls), With<Player>>,
    mut shifted: EventWriter<GravityShifted>,
) {
    if !keyboard.any_just_pressed(GRAVITY_KEYS) {
        return;
    }
    let Some(gravity) = pending.0 else {
        return;
    };
    let Ok((entity, mut controls)) = controls_query.get_single_mut() else {
        return;
    };
    if !controls.is_enabled() {
        return;
    }

    let from = controls.set_gravity(gravity);
    pending.0 = None;

    info!("Gravity shifted from {} to {}", from, gravity);
    shifted.send(GravityShifted {
        controls: entity,
        from,
        to: gravity,
    });
}
