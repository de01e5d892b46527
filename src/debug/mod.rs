//! Debug mode for fast iteration: detector overlays, state dumps and
//! round shortcuts.
//!
//! Keys:
//! - F1 toggles per-frame character info in the log
//! - F2 toggles contact detector and punch region gizmos
//! - F3 drops a golden slime above slot 0
//! - Ctrl+R restarts the round
//!
//! None of these keys is bound to a player.

mod systems;


use bevy::prelude::*;

use crate::core::GameState;

pub const INFO_KEY: KeyCode = KeyCode::F1;
pub const DETECTORS_KEY: KeyCode = KeyCode::F2;
pub const GOLDEN_SLIME_KEY: KeyCode = KeyCode::F3;
/// Pressed together with either Ctrl key.
pub const RESTART_KEY: KeyCode = KeyCode::KeyR;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Log every character each frame
    pub show_info: bool,
    /// Draw contact detectors
    pub show_detectors: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                systems::handle_debug_hotkeys,
                systems::log_character_info,
                systems::draw_detectors,
            )
                .chain()
                .run_if(in_state(GameState::Round)),
        );
    }
}
