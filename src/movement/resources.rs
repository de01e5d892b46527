//! Movement domain: shared tunables and fixed movement constants.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Each jump input moves vertical speed this fraction of the jump speed.
pub const JUMP_INCREMENT_DIVISOR: f32 = 5.0;
/// Stomping a creature adds jump speed divided by this.
pub const BOUNCE_DIVISOR: f32 = 5.0;
/// Horizontal speed scale when wall-jumping while pressing into the wall.
pub const WALL_JUMP_INTO_WALL_SCALE: f32 = 0.8;

/// Physics tunables shared by every character.
///
/// Loaded once at startup and injected into the character operations;
/// there are no per-character overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTuning {
    /// Horizontal speed gained per move input while grounded
    pub acceleration: f32,
    /// Maximum upward speed reachable by jumping
    #[serde(rename = "jumpspeed")]
    pub jump_speed: f32,
    /// Horizontal speed cap
    #[serde(rename = "maxspeed")]
    pub max_speed: f32,
    /// Signed vertical acceleration applied while airborne
    pub gravity: f32,
    /// Divisor applied to acceleration while airborne
    pub drag: u32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            acceleration: 40.0,
            jump_speed: 700.0,
            max_speed: 320.0,
            gravity: -1800.0,
            drag: 2,
        }
    }
}

impl CharacterTuning {
    /// Vertical speed added by one jump input.
    pub fn jump_increment(&self) -> f32 {
        self.jump_speed / JUMP_INCREMENT_DIVISOR
    }

    /// Horizontal speed gained per move input while airborne.
    pub fn air_acceleration(&self) -> f32 {
        self.acceleration / self.drag.max(1) as f32
    }

    /// Gravity as an acceleration vector.
    pub fn gravity_vector(&self) -> Vec2 {
        Vec2::new(0.0, self.gravity)
    }
}
