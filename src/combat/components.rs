//! Combat domain: components for things that can be punched.

use bevy::prelude::*;

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// The giant slime NPC. Punching it knocks normal slimes loose; beating it
/// leaves a golden one behind.
#[derive(Component, Debug, Default)]
pub struct GiantSlime;
