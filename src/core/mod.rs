//! Core domain: session state, pause handling and shared resources.

pub mod args;
pub mod resources;
pub mod state;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use resources::{
    simulation_active, AmbientRng, GameplayPaused, ScoreBoard, SessionConfig,
};
pub use args::SessionArgs;
pub use state::GameState;

use crate::movement::roster::Roster;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<SessionConfig>()
            .init_resource::<GameplayPaused>()
            .init_resource::<ScoreBoard>()
            .init_resource::<Roster>()
            .add_systems(Startup, (systems::setup_camera, systems::start_session))
            .add_systems(OnEnter(GameState::Round), systems::begin_round)
            .add_systems(
                Update,
                (systems::toggle_pause, systems::sync_virtual_clock).chain(),
            )
            .add_systems(Last, systems::end_session);
    }
}
