//! Movement domain: the per-player character state machine.
//!
//! A character is a bundle of flags plus a slime bag. It never owns its
//! body; every read and write goes through a [`PhysicsWorld`].

use bevy::prelude::*;

use crate::feedback::{CharacterEventKind, EffectKind, Feedback, Outbox};
use crate::movement::physics::PhysicsWorld;
use crate::movement::resources::{CharacterTuning, WALL_JUMP_INTO_WALL_SCALE};
use crate::movement::{ContactSide, Direction, Facing, GameLayer};
use crate::slime::{AddOutcome, SlimeBag};

/// Seconds a body must stay in the active zone between two deposits.
pub const ZONE_DEPOSIT_INTERVAL: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Character {
    id: usize,
    body: Option<Entity>,
    pub(crate) facing: Facing,
    pub(crate) on_floor: bool,
    pub(crate) can_double_jump: bool,
    pub(crate) first_jump_used: bool,
    pub(crate) ground_jump_issued: bool,
    pub(crate) hit_stunned: bool,
    pub(crate) velocity_capped: bool,
    pub(crate) pass_through: bool,
    pub(crate) attack_cooldown: f32,
    pub(crate) zone_timer: f32,
    pub(crate) bag: SlimeBag,
}

impl Character {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            body: None,
            facing: Facing::Right,
            on_floor: true,
            can_double_jump: false,
            first_jump_used: false,
            ground_jump_issued: false,
            hit_stunned: false,
            velocity_capped: false,
            pass_through: false,
            attack_cooldown: 0.0,
            zone_timer: ZONE_DEPOSIT_INTERVAL,
            bag: SlimeBag::default(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn body(&self) -> Option<Entity> {
        self.body
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn on_floor(&self) -> bool {
        self.on_floor
    }

    pub fn can_double_jump(&self) -> bool {
        self.can_double_jump
    }

    pub fn first_jump_used(&self) -> bool {
        self.first_jump_used
    }

    /// The ground jump of the current landing has been taken.
    pub fn ground_jump_issued(&self) -> bool {
        self.ground_jump_issued
    }

    pub fn hit_stunned(&self) -> bool {
        self.hit_stunned
    }

    pub fn velocity_capped(&self) -> bool {
        self.velocity_capped
    }

    pub fn pass_through(&self) -> bool {
        self.pass_through
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn zone_timer(&self) -> f32 {
        self.zone_timer
    }

    pub fn bag(&self) -> &SlimeBag {
        &self.bag
    }

    /// A hit-stunned character ignores movement, jump and attack input.
    pub fn can_move(&self) -> bool {
        !self.hit_stunned
    }

    pub(crate) fn attach(&mut self, body: Entity) {
        self.body = Some(body);
    }

    pub(crate) fn detach(&mut self) -> Option<Entity> {
        self.body.take()
    }

    /// Back to the spawn state, keeping the body binding.
    pub(crate) fn reset(&mut self) {
        let body = self.body;
        *self = Self::new(self.id);
        self.body = body;
    }

    /// Steer horizontally. Left and right accelerate toward the speed cap
    /// (damped by drag in the air); anything else stops a grounded body.
    pub fn move_horizontal<W: PhysicsWorld + ?Sized>(
        &mut self,
        direction: Option<Direction>,
        world: &mut W,
        tuning: &CharacterTuning,
    ) {
        if direction != Some(Direction::Down) {
            self.pass_through = false;
        }
        if self.hit_stunned {
            return;
        }
        let Some(body) = self.body else {
            return;
        };
        let Some(mut velocity) = world.velocity(body) else {
            return;
        };

        let step = if self.on_floor {
            tuning.acceleration
        } else {
            tuning.air_acceleration()
        };
        match direction {
            Some(Direction::Left) => {
                velocity.x = (velocity.x - step).max(-tuning.max_speed);
                self.facing = Facing::Left;
            }
            Some(Direction::Right) => {
                velocity.x = (velocity.x + step).min(tuning.max_speed);
                self.facing = Facing::Right;
            }
            _ if self.on_floor => velocity.x = 0.0,
            _ => {}
        }
        world.set_velocity(body, velocity);
    }

    /// One frame of a held jump input.
    ///
    /// Holding the input keeps adding a fraction of the jump speed until the
    /// cap is hit. Jumping down drops through one-way platforms instead.
    pub fn jump<W: PhysicsWorld + ?Sized>(
        &mut self,
        direction: Option<Direction>,
        world: &mut W,
        tuning: &CharacterTuning,
        outbox: &mut Outbox,
    ) {
        self.move_horizontal(direction, world, tuning);
        if self.hit_stunned {
            return;
        }
        let Some(body) = self.body else {
            return;
        };

        if direction == Some(Direction::Down) {
            self.pass_through = true;
            self.velocity_capped = true;
            return;
        }
        if self.velocity_capped {
            return;
        }
        let Some(mut velocity) = world.velocity(body) else {
            return;
        };

        let jump_speed = tuning.jump_speed;
        let increment = tuning.jump_increment();

        if self.on_floor || !self.first_jump_used {
            velocity.y = (velocity.y + increment).min(jump_speed);
        }

        if self.on_floor && !self.first_jump_used {
            // Floor contact lags the physics step; one jump per landing.
            if !self.ground_jump_issued {
                self.ground_jump_issued = true;
                outbox.character_event(self.id, CharacterEventKind::Jump);
                self.effect_at_feet(EffectKind::Jump, body, world, outbox);
            }
        } else if world.detect(body, GameLayer::World, ContactSide::Left).collision {
            let into_wall = direction == Some(Direction::Left);
            let speed = if into_wall {
                tuning.max_speed * WALL_JUMP_INTO_WALL_SCALE
            } else {
                tuning.max_speed
            };
            velocity = Vec2::new(speed, jump_speed);
            self.facing = if into_wall { Facing::Left } else { Facing::Right };
            self.wall_jumped(body, world, outbox);
        } else if world.detect(body, GameLayer::World, ContactSide::Right).collision {
            let into_wall = direction == Some(Direction::Right);
            let speed = if into_wall {
                tuning.max_speed * WALL_JUMP_INTO_WALL_SCALE
            } else {
                tuning.max_speed
            };
            velocity = Vec2::new(-speed, jump_speed);
            self.facing = if into_wall { Facing::Right } else { Facing::Left };
            self.wall_jumped(body, world, outbox);
        } else if self.can_double_jump && self.first_jump_used {
            velocity.y = (velocity.y.max(increment) + increment).min(jump_speed);
            self.can_double_jump = false;
            outbox.character_event(self.id, CharacterEventKind::DoubleJump);
            self.effect_at_feet(EffectKind::DoubleJump, body, world, outbox);
        }

        if velocity.y >= jump_speed {
            self.velocity_capped = true;
        }
        world.set_velocity(body, velocity);
    }

    /// The jump input was let go: the cap lifts, and an airborne character
    /// has spent its first jump. Letting go on the floor re-arms the ground
    /// jump.
    pub fn release_jump(&mut self) {
        self.velocity_capped = false;
        if self.on_floor {
            self.ground_jump_issued = false;
        } else {
            self.first_jump_used = true;
        }
    }

    /// Put a slime into the bag and report how it went.
    pub fn add_slime(&mut self, weight: u32, outbox: &mut Outbox) -> AddOutcome {
        let outcome = self.bag.add(weight);
        match outcome {
            AddOutcome::Added => {
                outbox.character_event(self.id, CharacterEventKind::SlimePickup);
            }
            AddOutcome::Rejected(_) => {
                outbox.character_event(self.id, CharacterEventKind::SlimeFull);
            }
            AddOutcome::Replaced => {}
        }
        outcome
    }

    fn wall_jumped<W: PhysicsWorld + ?Sized>(
        &mut self,
        body: Entity,
        world: &W,
        outbox: &mut Outbox,
    ) {
        self.first_jump_used = false;
        outbox.character_event(self.id, CharacterEventKind::WallJump);
        if let Some(position) = world.position(body) {
            outbox.emit(Feedback::Effect {
                kind: EffectKind::Squash,
                position,
                facing: self.facing,
            });
        }
    }

    pub(crate) fn effect_at_feet<W: PhysicsWorld + ?Sized>(
        &self,
        kind: EffectKind,
        body: Entity,
        world: &W,
        outbox: &mut Outbox,
    ) {
        let (Some(position), Some(scale)) = (world.position(body), world.scale(body)) else {
            return;
        };
        outbox.emit(Feedback::Effect {
            kind,
            position: position - Vec2::new(0.0, scale.y * 0.5),
            facing: self.facing,
        });
    }
}
