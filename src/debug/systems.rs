//! Debug domain: hotkeys and overlays.

use bevy::prelude::*;

use crate::combat::{punch_region, GiantSlime};
use crate::core::GameState;
use crate::debug::{DebugState, DETECTORS_KEY, GOLDEN_SLIME_KEY, INFO_KEY, RESTART_KEY};
use crate::movement::systems::avian::detector_shape;
use crate::movement::{ContactSide, PlayerBody, Roster};
use crate::slime::pickups::spawn_pickup;
use crate::slime::GOLDEN_WEIGHT;

pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut next_state: ResMut<NextState<GameState>>,
    bodies: Query<(&PlayerBody, &Transform)>,
) {
    if keyboard.just_pressed(INFO_KEY) {
        debug_state.show_info = !debug_state.show_info;
        info!("Debug character info: {}", debug_state.show_info);
    }
    if keyboard.just_pressed(DETECTORS_KEY) {
        debug_state.show_detectors = !debug_state.show_detectors;
        info!("Debug detectors: {}", debug_state.show_detectors);
    }
    if keyboard.just_pressed(GOLDEN_SLIME_KEY) {
        if let Some((_, transform)) = bodies.iter().find(|(body, _)| body.slot == 0) {
            let position = transform.translation.truncate() + Vec2::new(0.0, 60.0);
            spawn_pickup(&mut commands, position, GOLDEN_WEIGHT, None);
            info!("Debug: golden slime dropped at {position}");
        }
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl && keyboard.just_pressed(RESTART_KEY) {
        next_state.set(GameState::Round);
        info!("Debug: restarting round");
    }
}

pub(crate) fn log_character_info(debug_state: Res<DebugState>, roster: Res<Roster>) {
    if !debug_state.show_info {
        return;
    }
    for character in roster.iter() {
        info!(
            "slot {} floor={} first={} double={} stun={} cap={} pass={} cd={:.2} bag={:?}",
            character.id(),
            character.on_floor(),
            character.first_jump_used(),
            character.can_double_jump(),
            character.hit_stunned(),
            character.velocity_capped(),
            character.pass_through(),
            character.attack_cooldown(),
            character.bag().items()
        );
    }
}

pub(crate) fn draw_detectors(
    debug_state: Res<DebugState>,
    roster: Res<Roster>,
    bodies: Query<(&PlayerBody, &Transform)>,
    giants: Query<&Transform, With<GiantSlime>>,
    mut gizmos: Gizmos,
) {
    if !debug_state.show_detectors {
        return;
    }
    let sides = [
        ContactSide::Top,
        ContactSide::Bottom,
        ContactSide::Left,
        ContactSide::Right,
    ];
    for (body, transform) in &bodies {
        let position = transform.translation.truncate();
        let size = transform.scale.truncate().abs();
        for side in sides {
            let (offset, extent) = detector_shape(side, size);
            gizmos.rect_2d(
                Isometry2d::from_translation(position + offset),
                extent,
                Color::srgb(0.2, 1.0, 0.2),
            );
        }
        if let Some(character) = roster.get(body.slot) {
            let region = punch_region(None, character.facing());
            gizmos.rect_2d(
                Isometry2d::from_translation(position + region.offset * size),
                region.size * size,
                Color::srgb(1.0, 0.3, 0.3),
            );
        }
    }
    for transform in &giants {
        gizmos.rect_2d(
            Isometry2d::from_translation(transform.translation.truncate()),
            transform.scale.truncate(),
            Color::srgb(1.0, 0.8, 0.2),
        );
    }
}
