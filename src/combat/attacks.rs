//! Combat domain: the basic punch and how it resolves against what it hits.

use bevy::prelude::*;

use crate::combat::{
    GIANT_PUNCH_DAMAGE, KNOCKBACK_HORIZONTAL_SCALE, KNOCKBACK_VERTICAL_SCALE, PUNCH_COOLDOWN,
    PUNCH_DROPS, PUNCH_LENGTH, PUNCH_REACH, PUNCH_WIDTH, SUPER_PUNCH_DROPS,
};
use crate::feedback::{CharacterEventKind, EffectKind, Feedback, Haptic, Outbox, WorldCommand};
use crate::movement::physics::{BodyKind, HitRegion, PhysicsWorld};
use crate::movement::CharacterTuning;
use crate::movement::roster::Roster;
use crate::movement::{Direction, Facing, GameLayer};

/// Direction a punch travels, resolved from input and facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackDirection {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl AttackDirection {
    /// An explicit direction wins; otherwise the punch goes where the
    /// character faces.
    pub fn resolve(direction: Option<Direction>, facing: Facing) -> Self {
        match direction {
            Some(Direction::Up) => AttackDirection::Up,
            Some(Direction::Down) => AttackDirection::Down,
            Some(Direction::Left) => AttackDirection::Left,
            Some(Direction::Right) => AttackDirection::Right,
            None => match facing {
                Facing::Left => AttackDirection::Left,
                Facing::Right => AttackDirection::Right,
            },
        }
    }

    /// Get the offset vector for hitbox placement
    pub fn to_offset(self, distance: f32) -> Vec2 {
        match self {
            AttackDirection::Up => Vec2::new(0.0, distance),
            AttackDirection::Down => Vec2::new(0.0, -distance),
            AttackDirection::Left => Vec2::new(-distance, 0.0),
            AttackDirection::Right => Vec2::new(distance, 0.0),
        }
    }

    /// Get hitbox dimensions (width, height) - elongated in attack direction
    pub fn hitbox_size(self, length: f32, width: f32) -> Vec2 {
        match self {
            AttackDirection::Up | AttackDirection::Down => Vec2::new(width, length),
            AttackDirection::Left | AttackDirection::Right => Vec2::new(length, width),
        }
    }
}

/// The punch hit region in body-relative units.
pub fn punch_region(direction: Option<Direction>, facing: Facing) -> HitRegion {
    let attack = AttackDirection::resolve(direction, facing);
    HitRegion {
        offset: attack.to_offset(PUNCH_LENGTH * PUNCH_REACH),
        size: attack.hitbox_size(PUNCH_LENGTH, PUNCH_WIDTH),
        mask: [GameLayer::Player, GameLayer::King].into(),
    }
}

/// Punch from `slot`. Steers like a move first, then, if the cooldown has
/// run out, checks a short region in front of the character.
pub fn basic_attack<W: PhysicsWorld + ?Sized>(
    roster: &mut Roster,
    slot: usize,
    direction: Option<Direction>,
    world: &mut W,
    tuning: &CharacterTuning,
    outbox: &mut Outbox,
) {
    let Some(attacker) = roster.get_mut(slot) else {
        return;
    };
    attacker.move_horizontal(direction, world, tuning);
    if !attacker.can_move() || attacker.attack_cooldown > 0.0 {
        return;
    }
    let Some(body) = attacker.body() else {
        return;
    };
    attacker.attack_cooldown = PUNCH_COOLDOWN;
    let facing = attacker.facing();

    let Some(region) = world.acquire_region(body, punch_region(direction, facing)) else {
        warn!("Slot {slot} punch dropped: hit region pool exhausted");
        return;
    };

    let attacker_position = world.position(body).unwrap_or_default();
    if let Some(scale) = world.scale(body) {
        outbox.emit(Feedback::Effect {
            kind: EffectKind::Punch,
            position: attacker_position + Vec2::new(0.5 * scale.x * facing.sign(), 0.0),
            facing,
        });
    }

    let overlaps = world.region_overlaps(region);
    if !overlaps.collision {
        outbox.character_event(slot, CharacterEventKind::PunchMiss);
    }

    let mut struck: Vec<Entity> = Vec::new();
    for collider in overlaps.iter() {
        let Some(owner) = world.resolve(collider) else {
            continue;
        };
        if struck.contains(&owner.entity) {
            continue;
        }
        struck.push(owner.entity);

        match owner.kind {
            BodyKind::Player(target) if target == slot => {}
            BodyKind::Player(target) => {
                let punch = Punch {
                    attacker: slot,
                    attacker_position,
                    target,
                    direction,
                    super_punch: false,
                };
                punch_player(roster, punch, world, tuning, outbox);
            }
            BodyKind::Giant => {
                outbox.character_event(slot, CharacterEventKind::PunchHit);
                outbox.emit(attacker_rumble(slot));
                outbox.emit(punch_shake());
                let giant_position = world.position(owner.entity).unwrap_or_default();
                outbox.command(WorldCommand::DamageGiant {
                    giant: owner.entity,
                    amount: GIANT_PUNCH_DAMAGE,
                    force: attacker_position - giant_position,
                });
            }
            _ => outbox.character_event(slot, CharacterEventKind::PunchMiss),
        }
    }

    world.release_region(region);
}

struct Punch {
    attacker: usize,
    attacker_position: Vec2,
    target: usize,
    direction: Option<Direction>,
    super_punch: bool,
}

fn punch_player<W: PhysicsWorld + ?Sized>(
    roster: &mut Roster,
    punch: Punch,
    world: &mut W,
    tuning: &CharacterTuning,
    outbox: &mut Outbox,
) {
    let Some(target) = roster.get_mut(punch.target) else {
        outbox.character_event(punch.attacker, CharacterEventKind::PunchMiss);
        return;
    };
    let Some(target_body) = target.body() else {
        return;
    };
    let target_position = world.position(target_body).unwrap_or_default();

    if target.can_move() {
        outbox.character_event(punch.attacker, CharacterEventKind::PunchHit);
        outbox.emit(punch_shake());
        outbox.emit(Feedback::Haptic(Haptic {
            slot: punch.target,
            low: 0.5,
            high: 1.0,
            duration: 0.2,
        }));
        outbox.emit(attacker_rumble(punch.attacker));

        let side = match punch.direction {
            Some(Direction::Right) => 1.0,
            Some(Direction::Left) => -1.0,
            _ if target_position.x > punch.attacker_position.x => 1.0,
            _ => -1.0,
        };
        let knockback = Vec2::new(
            side * tuning.max_speed * KNOCKBACK_HORIZONTAL_SCALE,
            tuning.jump_speed * KNOCKBACK_VERTICAL_SCALE,
        );
        world.set_velocity(target_body, knockback);
        outbox.emit(Feedback::Effect {
            kind: EffectKind::Squash,
            position: target_position,
            facing: target.facing(),
        });
        debug!(
            "Slot {} punched slot {} for {knockback:?}",
            punch.attacker, punch.target
        );
    }

    target.hit_stunned = true;
    let drops = if punch.super_punch {
        SUPER_PUNCH_DROPS
    } else {
        PUNCH_DROPS
    };
    for _ in 0..drops {
        let Some(weight) = target.bag.pop() else {
            break;
        };
        outbox.command(WorldCommand::DropSlime {
            position: target_position,
            weight,
            owner: Some(punch.target),
        });
    }
}

fn punch_shake() -> Feedback {
    Feedback::CameraShake {
        magnitude: 0.05,
        duration: 0.015,
    }
}

fn attacker_rumble(slot: usize) -> Feedback {
    Feedback::Haptic(Haptic {
        slot,
        low: 0.5,
        high: 1.0,
        duration: 0.2,
    })
}
