//! Actions domain: the input command vocabulary and its dispatch onto a
//! character.

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::movement::physics::PhysicsWorld;
use crate::movement::roster::CharacterHandle;
use crate::movement::Direction;

/// One input command for one character. Everything but `Block` and
/// `ReleaseJump` carries an optional direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump(Option<Direction>),
    BasicAttack(Option<Direction>),
    SpecialAttack(Option<Direction>),
    /// Blocking has no direction
    Block,
    Move(Option<Direction>),
    /// The jump input was let go
    ReleaseJump,
}

impl Action {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Jump(direction)
            | Action::BasicAttack(direction)
            | Action::SpecialAttack(direction)
            | Action::Move(direction) => direction,
            Action::Block | Action::ReleaseJump => None,
        }
    }

    /// Same action aimed in `direction`. Directionless actions stay as
    /// they are.
    pub fn with_direction(self, direction: Option<Direction>) -> Self {
        match self {
            Action::Jump(_) => Action::Jump(direction),
            Action::BasicAttack(_) => Action::BasicAttack(direction),
            Action::SpecialAttack(_) => Action::SpecialAttack(direction),
            Action::Move(_) => Action::Move(direction),
            Action::Block | Action::ReleaseJump => self,
        }
    }

    /// Invoke the matching character operation.
    pub fn execute<W: PhysicsWorld + ?Sized>(self, character: &mut CharacterHandle<'_, W>) {
        match self {
            Action::Jump(direction) => character.jump(direction),
            Action::BasicAttack(direction) => character.basic_attack(direction),
            Action::SpecialAttack(direction) => character.special_attack(direction),
            Action::Block => character.block(),
            Action::Move(direction) => character.move_horizontal(direction),
            Action::ReleaseJump => character.release_jump(),
        }
    }
}

/// Actions gathered from input this frame, in arrival order.
#[derive(Resource, Debug, Default)]
pub struct ActionQueue {
    pending: Vec<(usize, Action)>,
}

impl ActionQueue {
    pub fn push(&mut self, slot: usize, action: Action) {
        self.pending.push((slot, action));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (usize, Action)> + '_ {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
