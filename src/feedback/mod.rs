//! Feedback domain: events, effects, haptics, popups and world commands
//! produced by the character core, and their presentation.

pub mod events;
pub mod outbox;
mod systems;

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::CharacterSet;

pub use events::{
    CharacterEventKind, EffectKind, Feedback, Haptic, Popup, PopupAnchor, PopupColor, PopupText,
    WorldCommand,
};
pub use outbox::Outbox;
pub use systems::{popup_position, CameraFocus, CameraShake, FloatingPopup, TEAM_COLORS};

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Feedback>()
            .add_message::<WorldCommand>()
            .init_resource::<Outbox>()
            .init_resource::<CameraShake>()
            .init_resource::<CameraFocus>()
            .add_systems(
                Update,
                systems::publish_outbox.in_set(CharacterSet::Publish),
            )
            .add_systems(
                Update,
                (
                    systems::log_feedback,
                    systems::rumble_gamepads,
                    systems::spawn_popups,
                    systems::collect_camera_cues,
                )
                    .in_set(CharacterSet::Consume),
            )
            .add_systems(
                Update,
                (
                    systems::animate_popups,
                    systems::move_camera.after(systems::collect_camera_cues),
                )
                    .run_if(in_state(GameState::Round)),
            );
    }
}
