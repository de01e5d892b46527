//! Feedback domain: the per-frame outbound queue.

use bevy::prelude::*;

use crate::feedback::events::{CharacterEventKind, Feedback, WorldCommand};

/// Queue filled by the character core during a frame and drained once the
/// update pass is over. Nothing in the core reads it back.
#[derive(Resource, Debug, Default)]
pub struct Outbox {
    feedback: Vec<Feedback>,
    commands: Vec<WorldCommand>,
}

impl Outbox {
    pub fn emit(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    pub fn character_event(&mut self, slot: usize, kind: CharacterEventKind) {
        self.emit(Feedback::Character { slot, kind });
    }

    pub fn command(&mut self, command: WorldCommand) {
        self.commands.push(command);
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn commands(&self) -> &[WorldCommand] {
        &self.commands
    }

    /// Character events of `kind` currently queued.
    pub fn count_events(&self, kind: CharacterEventKind) -> usize {
        self.feedback
            .iter()
            .filter(|f| matches!(f, Feedback::Character { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.feedback.is_empty() && self.commands.is_empty()
    }

    pub fn drain_feedback(&mut self) -> impl Iterator<Item = Feedback> + '_ {
        self.feedback.drain(..)
    }

    pub fn drain_commands(&mut self) -> impl Iterator<Item = WorldCommand> + '_ {
        self.commands.drain(..)
    }
}
