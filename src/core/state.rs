//! Core domain: game state definitions for the session flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Loading character globals; nothing simulates yet
    #[default]
    Boot,
    /// A round is being played
    Round,
}
