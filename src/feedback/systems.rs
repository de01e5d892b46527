//! Feedback domain: publishing the outbox and presenting what it carried.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::input::gamepad::{GamepadRumbleIntensity, GamepadRumbleRequest};
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::arena::RoundScoped;
use crate::core::AmbientRng;
use crate::feedback::events::{Feedback, Popup, PopupAnchor, PopupColor, PopupText, WorldCommand};
use crate::feedback::outbox::Outbox;
use crate::movement::GamepadSlot;

/// Pixels per unit of shake magnitude.
const SHAKE_SCALE: f32 = 200.0;
/// Fraction of the distance to its target the camera covers per second.
const CAMERA_FOLLOW_RATE: f32 = 4.0;
const POPUP_RISE_SPEED: f32 = 40.0;
const HUD_ORIGIN: Vec2 = Vec2::new(-480.0, 320.0);
const HUD_COLUMN_WIDTH: f32 = 320.0;

pub const TEAM_COLORS: [Color; 4] = [
    Color::srgb(0.95, 0.3, 0.3),
    Color::srgb(0.3, 0.55, 0.95),
    Color::srgb(0.35, 0.85, 0.4),
    Color::srgb(0.95, 0.8, 0.25),
];

/// Floating text that rises and fades out.
#[derive(Component, Debug)]
pub struct FloatingPopup {
    pub remaining: f32,
    pub lifetime: f32,
}

/// Active screen shake.
#[derive(Resource, Debug, Default)]
pub struct CameraShake {
    pub magnitude: f32,
    pub remaining: f32,
}

/// Where the camera wants to be, from this frame's pings.
#[derive(Resource, Debug, Default)]
pub struct CameraFocus {
    pub target: Option<Vec2>,
    /// Camera position before shake is applied
    pub anchor: Vec2,
}

/// Drain the outbox into messages once the update pass is over.
pub(crate) fn publish_outbox(
    mut outbox: ResMut<Outbox>,
    mut feedback: MessageWriter<Feedback>,
    mut commands: MessageWriter<WorldCommand>,
) {
    for item in outbox.drain_feedback() {
        feedback.write(item);
    }
    for command in outbox.drain_commands() {
        commands.write(command);
    }
}

/// Stand-in for audio and particles: character events and effects are
/// logged.
pub(crate) fn log_feedback(mut feedback: MessageReader<Feedback>) {
    for item in feedback.read() {
        match item {
            Feedback::Character { slot, kind } => debug!("Slot {slot}: {kind:?}"),
            Feedback::Effect { kind, position, .. } => trace!("Effect {kind:?} at {position}"),
            _ => {}
        }
    }
}

pub(crate) fn rumble_gamepads(
    mut feedback: MessageReader<Feedback>,
    gamepads: Query<(Entity, &GamepadSlot)>,
    mut rumble: MessageWriter<GamepadRumbleRequest>,
) {
    for item in feedback.read() {
        let (slot, request) = match *item {
            Feedback::Haptic(haptic) => (haptic.slot, Some(haptic)),
            Feedback::StopHaptic { slot } => (slot, None),
            _ => continue,
        };
        for (gamepad, _) in gamepads.iter().filter(|(_, s)| s.0 == slot) {
            let request = match request {
                Some(haptic) => GamepadRumbleRequest::Add {
                    gamepad,
                    duration: Duration::from_secs_f32(haptic.duration.max(0.0)),
                    intensity: GamepadRumbleIntensity {
                        strong_motor: haptic.low.clamp(0.0, 1.0),
                        weak_motor: haptic.high.clamp(0.0, 1.0),
                    },
                },
                None => GamepadRumbleRequest::Stop { gamepad },
            };
            rumble.write(request);
        }
    }
}

pub(crate) fn spawn_popups(mut commands: Commands, mut feedback: MessageReader<Feedback>) {
    for item in feedback.read() {
        let Feedback::Popup(popup) = item else {
            continue;
        };
        commands.spawn((
            Text2d::new(popup_text(popup)),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            TextColor(popup_color(popup.color)),
            Transform::from_translation(popup_position(popup.anchor).extend(10.0)),
            FloatingPopup {
                remaining: popup.lifetime,
                lifetime: popup.lifetime,
            },
            RoundScoped,
        ));
    }
}

pub(crate) fn animate_popups(
    mut commands: Commands,
    time: Res<Time>,
    mut popups: Query<(Entity, &mut FloatingPopup, &mut Transform, &mut TextColor)>,
) {
    let dt = time.delta_secs();
    for (entity, mut popup, mut transform, mut color) in &mut popups {
        popup.remaining -= dt;
        if popup.remaining <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation.y += POPUP_RISE_SPEED * dt;
        color.0.set_alpha(popup.remaining / popup.lifetime.max(f32::EPSILON));
    }
}

pub(crate) fn collect_camera_cues(
    mut feedback: MessageReader<Feedback>,
    mut shake: ResMut<CameraShake>,
    mut focus: ResMut<CameraFocus>,
) {
    let mut sum = Vec2::ZERO;
    let mut weight = 0.0;
    for item in feedback.read() {
        match *item {
            Feedback::CameraShake {
                magnitude,
                duration,
            } => {
                shake.magnitude = shake.magnitude.max(magnitude);
                shake.remaining = shake.remaining.max(duration);
            }
            Feedback::CameraPing { position, priority } => {
                let w = priority.max(1) as f32;
                sum += position * w;
                weight += w;
            }
            _ => {}
        }
    }
    focus.target = (weight > 0.0).then(|| sum / weight);
}

pub(crate) fn move_camera(
    time: Res<Time>,
    mut shake: ResMut<CameraShake>,
    mut focus: ResMut<CameraFocus>,
    mut rng: ResMut<AmbientRng>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let dt = time.delta_secs();
    if let Some(target) = focus.target {
        let t = (CAMERA_FOLLOW_RATE * dt).min(1.0);
        focus.anchor = focus.anchor.lerp(target, t);
    }

    let mut offset = Vec2::ZERO;
    if shake.remaining > 0.0 {
        shake.remaining -= dt;
        let reach = shake.magnitude * SHAKE_SCALE;
        offset = Vec2::new(
            rng.0.random_range(-reach..=reach),
            rng.0.random_range(-reach..=reach),
        );
    }

    for mut transform in &mut cameras {
        transform.translation.x = focus.anchor.x + offset.x;
        transform.translation.y = focus.anchor.y + offset.y;
    }
}

fn popup_text(popup: &Popup) -> String {
    match &popup.text {
        PopupText::Number(value) => value.to_string(),
        PopupText::Label(label) => (*label).to_string(),
    }
}

fn popup_color(color: PopupColor) -> Color {
    match color {
        PopupColor::Team(slot) => TEAM_COLORS[slot % TEAM_COLORS.len()],
        PopupColor::Alert => Color::srgb(1.0, 0.2, 0.2),
    }
}

/// World position of a popup anchor. Screen anchors are HUD columns.
pub fn popup_position(anchor: PopupAnchor) -> Vec2 {
    match anchor {
        PopupAnchor::World(position) => position,
        PopupAnchor::Screen(slot) => HUD_ORIGIN + Vec2::new(slot as f32 * HUD_COLUMN_WIDTH, 0.0),
    }
}
