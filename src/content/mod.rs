//! Content domain: loading and validating data files at startup.

pub mod loader;
pub mod validation;

#[cfg(test)]
mod tests;

use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::path::PathBuf;

use crate::core::GameState;

pub use loader::{load_character_tuning, parse_character_tuning, ContentLoadError};
pub use validation::{validate_tuning, ValidationError};

pub const CHARACTER_GLOBALS_PATH: &str = "assets/data/character_globals.json";

/// Where data files are read from.
#[derive(Resource, Debug, Clone)]
pub struct ContentPaths {
    pub character_globals: PathBuf,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            character_globals: PathBuf::from(CHARACTER_GLOBALS_PATH),
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentPaths>()
            .add_systems(Startup, load_content);
    }
}

/// Load character globals. Without valid globals no round ever starts and
/// the app exits with an error.
fn load_content(
    mut commands: Commands,
    paths: Res<ContentPaths>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let tuning = match load_character_tuning(&paths.character_globals) {
        Ok(tuning) => tuning,
        Err(e) => {
            error!("{}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for e in &errors {
            error!("Content validation error: {}", e);
        }
        exit.write(AppExit::error());
        return;
    }

    info!(
        "Loaded character globals: accel={}, jump={}, max={}, gravity={}, drag={}",
        tuning.acceleration, tuning.jump_speed, tuning.max_speed, tuning.gravity, tuning.drag
    );
    commands.insert_resource(tuning);
    next_state.set(GameState::Round);
}
