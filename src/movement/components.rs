//! Movement domain: physics layers, directions and body components.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid world geometry (floors, walls, ceilings)
    World,
    /// One-way "ghost" platforms, solid only from above
    Ghost,
    /// Player character bodies
    Player,
    /// Small slime creatures that can be stomped
    Slime,
    /// The giant slime NPC
    King,
    /// Scoring zones (sensors)
    Goal,
    /// Dropped slime pickups (sensors)
    Pickup,
}

/// Directional argument carried by an input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Which detector of a body a contact query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSide {
    Top,
    Bottom,
    Left,
    Right,
    /// The whole body footprint (zones, pickups)
    Body,
}

/// Marks the body entity driven by the character in the given roster slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBody {
    pub slot: usize,
}

/// Acceleration integrated into the body's velocity every tick.
/// Zero while grounded, gravity while airborne.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BodyAcceleration(pub Vec2);

/// Whether the body currently ignores one-way platforms.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PassThrough(pub bool);

impl PassThrough {
    /// Collision layers for a player body with the given pass-through state.
    pub fn collision_layers(self) -> CollisionLayers {
        if self.0 {
            CollisionLayers::new(GameLayer::Player, [GameLayer::World])
        } else {
            CollisionLayers::new(GameLayer::Player, [GameLayer::World, GameLayer::Ghost])
        }
    }
}

/// Marker for solid world colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for one-way platform colliders
#[derive(Component, Debug)]
pub struct GhostPlatform;
