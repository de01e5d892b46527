//! Slime domain: what characters carry, where it comes from and where it
//! gets delivered.

mod bag;
pub mod pickups;
pub mod zone;


use bevy::prelude::*;

use crate::core::{simulation_active, GameState};
use crate::movement::CharacterSet;

pub use bag::{AddOutcome, SlimeBag, SlimeClass, DEFAULT_BAG_CAPACITY, GOLDEN_WEIGHT, NORMAL_WEIGHT};
pub use pickups::{Creature, CreatureSpawner, SlimePickup};
pub use zone::{ActiveZone, ScoringZone};

pub struct SlimePlugin;

impl Plugin for SlimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveZone>()
            .init_resource::<CreatureSpawner>()
            .add_systems(
                Update,
                (
                    zone::rotate_active_zone,
                    pickups::tick_pickup_grace,
                    pickups::spawn_creatures,
                )
                    .in_set(CharacterSet::Input)
                    .run_if(in_state(GameState::Round))
                    .run_if(simulation_active),
            )
            .add_systems(
                Update,
                pickups::collect_pickups
                    .in_set(CharacterSet::Reconcile)
                    .after(crate::movement::run_character_frame)
                    .run_if(in_state(GameState::Round))
                    .run_if(simulation_active),
            )
            .add_systems(
                Update,
                (pickups::destroy_creatures, pickups::drop_slime).in_set(CharacterSet::Consume),
            );
    }
}
