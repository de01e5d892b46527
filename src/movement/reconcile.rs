//! Movement domain: the per-frame reconciliation of every character with
//! the physics state its body ended up in.

use bevy::prelude::*;
use rand::Rng;

use crate::core::ScoreBoard;
use crate::feedback::{EffectKind, Feedback, Haptic, Outbox, WorldCommand};
use crate::movement::character::Character;
use crate::movement::physics::{BodyKind, PhysicsWorld};
use crate::movement::resources::{CharacterTuning, BOUNCE_DIVISOR};
use crate::movement::roster::Roster;
use crate::movement::{ContactSide, GameLayer};
use crate::slime::zone::deposit_in_zone;

/// One-in-N chance per frame that a full bag wobbles.
pub const SQUISH_ODDS: u32 = 11;
/// Camera pings look this far ahead along the velocity.
pub const CAMERA_LEAD: f32 = 0.5;
/// Camera ping priority before subtracting the player count.
pub const CAMERA_PRIORITY_BASE: i32 = 5;

/// Everything one update pass reads or writes besides the roster.
pub struct FrameContext<'a, W: PhysicsWorld + ?Sized, R: Rng> {
    pub world: &'a mut W,
    pub tuning: &'a CharacterTuning,
    pub outbox: &'a mut Outbox,
    pub scores: &'a mut ScoreBoard,
    /// Zone currently accepting deposits
    pub active_zone: Option<u32>,
    pub rng: &'a mut R,
}

impl Roster {
    /// Reconcile every character with its body. Skipped entirely while the
    /// simulation clock is stopped.
    pub fn update<W: PhysicsWorld + ?Sized, R: Rng>(
        &mut self,
        dt: f32,
        timescale: f32,
        frame: &mut FrameContext<'_, W, R>,
    ) {
        if timescale <= 0.0 {
            return;
        }
        let player_count = self.len();
        for character in self.iter_mut() {
            reconcile(character, dt, player_count, frame);
        }
    }
}

fn reconcile<W: PhysicsWorld + ?Sized, R: Rng>(
    character: &mut Character,
    dt: f32,
    player_count: usize,
    frame: &mut FrameContext<'_, W, R>,
) {
    let Some(body) = character.body() else {
        return;
    };
    let (Some(position), Some(velocity)) = (frame.world.position(body), frame.world.velocity(body))
    else {
        trace!("Slot {} body {body:?} is gone", character.id());
        return;
    };
    let slot = character.id();

    if character.bag.is_full() && frame.rng.random_range(0..SQUISH_ODDS) == 0 {
        frame.outbox.emit(Feedback::Effect {
            kind: EffectKind::Squish,
            position,
            facing: character.facing,
        });
    }
    frame.outbox.emit(Feedback::CameraPing {
        position: position + velocity * CAMERA_LEAD,
        priority: CAMERA_PRIORITY_BASE - player_count as i32,
    });

    if character.attack_cooldown > 0.0 {
        character.attack_cooldown -= dt;
    }

    if character.hit_stunned {
        frame.outbox.emit(Feedback::Haptic(Haptic {
            slot,
            low: 0.0,
            high: 1.0,
            duration: 0.2,
        }));
    }

    if velocity.y > 0.0 {
        character.pass_through = true;
    }
    frame.world.set_pass_through(body, character.pass_through);

    deposit_in_zone(character, body, dt, frame);

    let world = &*frame.world;
    if world.detect(body, GameLayer::World, ContactSide::Top).collision {
        character.velocity_capped = false;
    }
    if world.detect(body, GameLayer::World, ContactSide::Left).collision
        || world.detect(body, GameLayer::World, ContactSide::Right).collision
    {
        character.hit_stunned = false;
        character.velocity_capped = false;
    }

    stomp_creatures(character, body, frame);
    resolve_floor(character, body, frame.world, frame.tuning, frame.outbox);
}

/// Landing on small slimes destroys them and bounces the character.
fn stomp_creatures<W: PhysicsWorld + ?Sized, R: Rng>(
    character: &mut Character,
    body: Entity,
    frame: &mut FrameContext<'_, W, R>,
) {
    let contacts = frame.world.detect(body, GameLayer::Slime, ContactSide::Bottom);
    if !contacts.collision {
        return;
    }

    let mut stomped = false;
    for collider in contacts.iter() {
        let Some(owner) = frame.world.resolve(collider) else {
            continue;
        };
        if owner.kind == BodyKind::Creature {
            frame.outbox.command(WorldCommand::DestroyCreature {
                creature: owner.entity,
                by: character.id(),
            });
            stomped = true;
        }
    }
    if !stomped {
        return;
    }

    if let Some(mut velocity) = frame.world.velocity(body) {
        velocity.y = velocity.y.max(0.0) + frame.tuning.jump_speed / BOUNCE_DIVISOR;
        frame.world.set_velocity(body, velocity);
    }
    if let Some(position) = frame.world.position(body) {
        frame.outbox.emit(Feedback::Effect {
            kind: EffectKind::Jump,
            position,
            facing: character.facing,
        });
    }
    frame.outbox.emit(Feedback::Haptic(Haptic {
        slot: character.id(),
        low: 0.2 * character.bag.total_weight() as f32,
        high: 0.0,
        duration: 0.15,
    }));
    character.first_jump_used = true;
    character.can_double_jump = true;
}

/// Landing and leaving edges of the floor contact.
fn resolve_floor<W: PhysicsWorld + ?Sized>(
    character: &mut Character,
    body: Entity,
    world: &mut W,
    tuning: &CharacterTuning,
    outbox: &mut Outbox,
) {
    let touching = world.detect(body, GameLayer::World, ContactSide::Bottom).collision
        || (!character.pass_through
            && world.detect(body, GameLayer::Ghost, ContactSide::Bottom).collision);

    if touching && !character.on_floor {
        world.set_acceleration(body, Vec2::ZERO);
        if let Some(mut velocity) = world.velocity(body) {
            velocity.y = 0.0;
            world.set_velocity(body, velocity);
        }
        character.on_floor = true;
        character.first_jump_used = false;
        character.ground_jump_issued = false;
        character.hit_stunned = false;
        character.velocity_capped = false;
        character.effect_at_feet(EffectKind::Landing, body, &*world, outbox);
    } else if !touching && character.on_floor {
        world.set_acceleration(body, tuning.gravity_vector());
        character.on_floor = false;
        character.can_double_jump = true;
        if world.velocity(body).is_some_and(|velocity| velocity.y <= 0.0) {
            character.first_jump_used = true;
        }
    }
}
