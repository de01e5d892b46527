//! Movement domain: the character state machine, its physics collaborator
//! and the per-frame pipeline driving it.

pub mod character;
mod components;
pub mod physics;
pub mod reconcile;
mod resources;
pub mod roster;
pub mod systems;


use bevy::prelude::*;

use crate::actions::ActionQueue;
use crate::core::{simulation_active, GameState};

pub use character::Character;
pub use components::*;
pub use resources::*;
pub use roster::Roster;
pub use systems::avian::AvianWorld;
pub use systems::frame::run_character_frame;
pub use systems::input::{ControlSample, GamepadSlot, KeyBindings, KEYBOARD_BINDINGS};

/// Stages of a character frame, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    /// Sample devices into actions
    Input,
    /// Dispatch actions onto characters
    Act,
    /// Reconcile characters with their bodies
    Reconcile,
    /// Drain the outbox into messages
    Publish,
    /// Collaborators react to published messages
    Consume,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionQueue>()
            .init_resource::<physics::HitRegionPool>()
            .configure_sets(
                Update,
                (
                    CharacterSet::Input,
                    CharacterSet::Act,
                    CharacterSet::Reconcile,
                    CharacterSet::Publish,
                    CharacterSet::Consume,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (systems::input::assign_gamepad_slots, systems::input::read_input)
                    .chain()
                    .in_set(CharacterSet::Input)
                    .run_if(in_state(GameState::Round))
                    .run_if(simulation_active),
            )
            .add_systems(
                Update,
                systems::frame::apply_actions
                    .in_set(CharacterSet::Act)
                    .run_if(in_state(GameState::Round))
                    .run_if(resource_exists::<CharacterTuning>),
            )
            .add_systems(
                Update,
                (
                    run_character_frame,
                    systems::frame::apply_body_acceleration.run_if(simulation_active),
                    systems::frame::sync_collision_layers,
                    systems::frame::sync_facing,
                )
                    .chain()
                    .in_set(CharacterSet::Reconcile)
                    .run_if(in_state(GameState::Round))
                    .run_if(resource_exists::<CharacterTuning>),
            );
    }
}
