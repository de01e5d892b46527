//! Movement domain: the fixed set of characters in a session.

use bevy::prelude::*;

use crate::combat;
use crate::feedback::Outbox;
use crate::movement::character::Character;
use crate::movement::physics::PhysicsWorld;
use crate::movement::resources::CharacterTuning;
use crate::movement::Direction;

/// Upper bound on local players.
pub const MAX_PLAYERS: usize = 4;

/// All characters of the session, indexed by player slot.
///
/// Created once per session, reset between rounds and shut down at
/// teardown. Slots never change after creation.
#[derive(Resource, Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new(players: usize) -> Self {
        let players = players.min(MAX_PLAYERS);
        Self {
            characters: (0..players).map(Character::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Character> {
        self.characters.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Character> {
        self.characters.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    /// Bind a body to a slot. Returns false for an unknown slot.
    pub fn attach_body(&mut self, slot: usize, body: Entity) -> bool {
        match self.characters.get_mut(slot) {
            Some(character) => {
                character.attach(body);
                true
            }
            None => {
                warn!("Cannot attach body {body:?}: no character in slot {slot}");
                false
            }
        }
    }

    pub fn slot_for_body(&self, body: Entity) -> Option<usize> {
        self.characters
            .iter()
            .position(|character| character.body() == Some(body))
    }

    /// Teleport a slot's body to a spawn point.
    pub fn place<W: PhysicsWorld + ?Sized>(&self, slot: usize, position: Vec2, world: &mut W) {
        let Some(body) = self.get(slot).and_then(Character::body) else {
            return;
        };
        world.set_position(body, position);
        world.set_velocity(body, Vec2::ZERO);
    }

    /// Empty every bag and clear every flag for a new round.
    pub fn reset_round(&mut self) {
        for character in &mut self.characters {
            character.reset();
        }
        debug!("Roster reset for {} players", self.characters.len());
    }

    /// Drop all body bindings. Returns the bodies that were attached.
    pub fn shutdown(&mut self) -> Vec<Entity> {
        let bodies: Vec<Entity> = self
            .characters
            .iter_mut()
            .filter_map(Character::detach)
            .collect();
        info!("Roster shut down, released {} bodies", bodies.len());
        bodies
    }

    /// Borrow one slot together with everything its operations need.
    pub fn handle<'a, W: PhysicsWorld + ?Sized>(
        &'a mut self,
        slot: usize,
        world: &'a mut W,
        tuning: &'a CharacterTuning,
        outbox: &'a mut Outbox,
    ) -> CharacterHandle<'a, W> {
        CharacterHandle {
            roster: self,
            slot,
            world,
            tuning,
            outbox,
        }
    }
}

/// A character slot bound to its collaborators for the duration of one
/// dispatch. Operations on an empty slot do nothing.
pub struct CharacterHandle<'a, W: PhysicsWorld + ?Sized> {
    roster: &'a mut Roster,
    slot: usize,
    world: &'a mut W,
    tuning: &'a CharacterTuning,
    outbox: &'a mut Outbox,
}

impl<W: PhysicsWorld + ?Sized> CharacterHandle<'_, W> {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn move_horizontal(&mut self, direction: Option<Direction>) {
        if let Some(character) = self.roster.get_mut(self.slot) {
            character.move_horizontal(direction, &mut *self.world, self.tuning);
        }
    }

    pub fn jump(&mut self, direction: Option<Direction>) {
        if let Some(character) = self.roster.get_mut(self.slot) {
            character.jump(direction, &mut *self.world, self.tuning, &mut *self.outbox);
        }
    }

    pub fn release_jump(&mut self) {
        if let Some(character) = self.roster.get_mut(self.slot) {
            character.release_jump();
        }
    }

    pub fn basic_attack(&mut self, direction: Option<Direction>) {
        combat::basic_attack(
            &mut *self.roster,
            self.slot,
            direction,
            &mut *self.world,
            self.tuning,
            &mut *self.outbox,
        );
    }

    /// Reserved: the character has no special attack yet.
    pub fn special_attack(&mut self, direction: Option<Direction>) {
        trace!("Slot {} special attack {direction:?} ignored", self.slot);
    }

    /// Reserved: the character has no block yet.
    pub fn block(&mut self) {
        trace!("Slot {} block ignored", self.slot);
    }
}
