//! Feedback domain: categorized outbound values produced by the character core.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::Facing;

/// Categorized character events consumed by audio and VFX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterEventKind {
    Jump,
    DoubleJump,
    WallJump,
    PunchHit,
    PunchMiss,
    SlimePickup,
    SlimeFull,
    SlimeDeliver,
    SlimeGolden,
}

/// Particle / squash-and-stretch effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Jump,
    DoubleJump,
    Landing,
    Punch,
    /// Squash-and-stretch on a body that jumped or got punched
    Squash,
    /// Idle wobble of a full slime bag
    Squish,
}

/// Controller vibration request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haptic {
    pub slot: usize,
    pub low: f32,
    pub high: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupText {
    Number(u32),
    Label(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupColor {
    Team(usize),
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupAnchor {
    World(Vec2),
    /// The HUD column of a player slot
    Screen(usize),
}

/// Floating text request.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub text: PopupText,
    pub color: PopupColor,
    pub anchor: PopupAnchor,
    pub lifetime: f32,
}

/// Everything the simulation wants presented to the players.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Character {
        slot: usize,
        kind: CharacterEventKind,
    },
    Effect {
        kind: EffectKind,
        position: Vec2,
        facing: Facing,
    },
    Haptic(Haptic),
    StopHaptic {
        slot: usize,
    },
    CameraShake {
        magnitude: f32,
        duration: f32,
    },
    /// Hint that a point of interest should stay on screen
    CameraPing {
        position: Vec2,
        priority: i32,
    },
    Popup(Popup),
}

impl Message for Feedback {}

/// Requests for collaborators that own creatures, the giant and pickups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldCommand {
    DestroyCreature {
        creature: Entity,
        by: usize,
    },
    DamageGiant {
        giant: Entity,
        amount: f32,
        force: Vec2,
    },
    /// Spawn a pickup. `owner` is the slot that lost it, if any.
    DropSlime {
        position: Vec2,
        weight: u32,
        owner: Option<usize>,
    },
}

impl Message for WorldCommand {}
