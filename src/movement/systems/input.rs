//! Movement domain: input sampling into per-slot actions.

use bevy::prelude::*;

use crate::actions::{Action, ActionQueue};
use crate::movement::roster::Roster;
use crate::movement::Direction;

/// Stick or key axis magnitude that counts as a direction.
const AXIS_THRESHOLD: f32 = 0.5;

/// Links a connected gamepad to a player slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadSlot(pub usize);

/// Keyboard layout for one player.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub jump: KeyCode,
    pub attack: KeyCode,
    pub special: KeyCode,
    pub block: KeyCode,
}

/// Slots 0 and 1 share the keyboard.
pub const KEYBOARD_BINDINGS: [KeyBindings; 2] = [
    KeyBindings {
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
        up: KeyCode::KeyW,
        down: KeyCode::KeyS,
        jump: KeyCode::Space,
        attack: KeyCode::KeyF,
        special: KeyCode::KeyG,
        block: KeyCode::KeyH,
    },
    KeyBindings {
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
        up: KeyCode::ArrowUp,
        down: KeyCode::ArrowDown,
        jump: KeyCode::Period,
        attack: KeyCode::Comma,
        special: KeyCode::KeyM,
        block: KeyCode::KeyN,
    },
];

/// One frame of controls for one slot, from any device.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSample {
    pub axis: Vec2,
    pub jump_held: bool,
    pub jump_released: bool,
    pub attack_pressed: bool,
    pub special_pressed: bool,
    pub block_pressed: bool,
}

impl ControlSample {
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>, keys: &KeyBindings) -> Self {
        let mut axis = Vec2::ZERO;
        if keyboard.pressed(keys.left) {
            axis.x -= 1.0;
        }
        if keyboard.pressed(keys.right) {
            axis.x += 1.0;
        }
        if keyboard.pressed(keys.down) {
            axis.y -= 1.0;
        }
        if keyboard.pressed(keys.up) {
            axis.y += 1.0;
        }
        Self {
            axis,
            jump_held: keyboard.pressed(keys.jump),
            jump_released: keyboard.just_released(keys.jump),
            attack_pressed: keyboard.just_pressed(keys.attack),
            special_pressed: keyboard.just_pressed(keys.special),
            block_pressed: keyboard.just_pressed(keys.block),
        }
    }

    pub fn from_gamepad(gamepad: &Gamepad) -> Self {
        let mut axis = gamepad.left_stick();
        if gamepad.pressed(GamepadButton::DPadLeft) {
            axis.x -= 1.0;
        }
        if gamepad.pressed(GamepadButton::DPadRight) {
            axis.x += 1.0;
        }
        if gamepad.pressed(GamepadButton::DPadDown) {
            axis.y -= 1.0;
        }
        if gamepad.pressed(GamepadButton::DPadUp) {
            axis.y += 1.0;
        }
        Self {
            axis,
            jump_held: gamepad.pressed(GamepadButton::South),
            jump_released: gamepad.just_released(GamepadButton::South),
            attack_pressed: gamepad.just_pressed(GamepadButton::West),
            special_pressed: gamepad.just_pressed(GamepadButton::North),
            block_pressed: gamepad.just_pressed(GamepadButton::RightTrigger),
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            axis: (self.axis + other.axis).clamp(Vec2::NEG_ONE, Vec2::ONE),
            jump_held: self.jump_held || other.jump_held,
            jump_released: self.jump_released || other.jump_released,
            attack_pressed: self.attack_pressed || other.attack_pressed,
            special_pressed: self.special_pressed || other.special_pressed,
            block_pressed: self.block_pressed || other.block_pressed,
        }
    }

    /// Horizontal input wins over vertical.
    pub fn direction(&self) -> Option<Direction> {
        if self.axis.x <= -AXIS_THRESHOLD {
            Some(Direction::Left)
        } else if self.axis.x >= AXIS_THRESHOLD {
            Some(Direction::Right)
        } else if self.axis.y <= -AXIS_THRESHOLD {
            Some(Direction::Down)
        } else if self.axis.y >= AXIS_THRESHOLD {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Actions this sample produces. Exactly one of attack, jump or move
    /// is issued every frame so the body keeps being steered.
    pub fn actions(&self) -> Vec<Action> {
        let direction = self.direction();
        let mut actions = Vec::with_capacity(3);
        if self.attack_pressed {
            actions.push(Action::BasicAttack(direction));
        } else if self.jump_held {
            actions.push(Action::Jump(direction));
        } else {
            actions.push(Action::Move(direction));
        }
        if self.jump_released {
            actions.push(Action::ReleaseJump);
        }
        if self.special_pressed {
            actions.push(Action::SpecialAttack(direction));
        }
        if self.block_pressed {
            actions.push(Action::Block);
        }
        actions
    }
}

/// New gamepads take the lowest free slot.
pub(crate) fn assign_gamepad_slots(
    mut commands: Commands,
    fresh: Query<Entity, (With<Gamepad>, Without<GamepadSlot>)>,
    assigned: Query<&GamepadSlot>,
    roster: Res<Roster>,
) {
    let mut taken: Vec<usize> = assigned.iter().map(|slot| slot.0).collect();
    for gamepad in &fresh {
        let Some(slot) = (0..roster.len()).find(|slot| !taken.contains(slot)) else {
            debug!("Gamepad {gamepad:?} connected but every slot has a controller");
            continue;
        };
        taken.push(slot);
        commands.entity(gamepad).insert(GamepadSlot(slot));
        info!("Gamepad {gamepad:?} controls slot {slot}");
    }
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<(&Gamepad, &GamepadSlot)>,
    roster: Res<Roster>,
    mut queue: ResMut<ActionQueue>,
) {
    for slot in 0..roster.len() {
        let mut sample = KEYBOARD_BINDINGS
            .get(slot)
            .map(|keys| ControlSample::from_keyboard(&keyboard, keys))
            .unwrap_or_default();
        for (gamepad, _) in gamepads.iter().filter(|(_, s)| s.0 == slot) {
            sample = sample.merge(ControlSample::from_gamepad(gamepad));
        }
        for action in sample.actions() {
            queue.push(slot, action);
        }
    }
}
