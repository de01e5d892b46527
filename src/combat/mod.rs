//! Combat domain: punching other players and the giant slime.

mod attacks;
mod components;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::movement::CharacterSet;

pub use attacks::{basic_attack, punch_region, AttackDirection};
pub use components::{GiantSlime, Health};

/// Seconds between two punches.
pub const PUNCH_COOLDOWN: f32 = 0.5;
/// Punch region length along the attack direction, in body widths.
pub const PUNCH_LENGTH: f32 = 1.2;
/// Punch region thickness across the attack direction, in body widths.
pub const PUNCH_WIDTH: f32 = 0.5;
/// Region center sits this fraction of its length away from the body.
pub const PUNCH_REACH: f32 = 0.8;
/// Horizontal knockback as a multiple of max speed.
pub const KNOCKBACK_HORIZONTAL_SCALE: f32 = 1.5;
/// Vertical knockback as a multiple of jump speed.
pub const KNOCKBACK_VERTICAL_SCALE: f32 = 0.5;
/// Slimes knocked out of a punched player.
pub const PUNCH_DROPS: usize = 2;
/// Slimes knocked out by a super punch.
pub const SUPER_PUNCH_DROPS: usize = 5;
pub const GIANT_PUNCH_DAMAGE: f32 = 2.0;
pub const GIANT_HEALTH: f32 = 20.0;
/// Speed the giant recoils with when punched.
pub const GIANT_FLINCH_SPEED: f32 = 120.0;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::apply_giant_damage.in_set(CharacterSet::Consume),
        );
    }
}
