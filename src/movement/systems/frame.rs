//! Movement domain: the per-frame character pipeline.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actions::ActionQueue;
use crate::core::{AmbientRng, ScoreBoard};
use crate::feedback::Outbox;
use crate::movement::reconcile::FrameContext;
use crate::movement::resources::CharacterTuning;
use crate::movement::roster::Roster;
use crate::movement::systems::avian::AvianWorld;
use crate::movement::{BodyAcceleration, Facing, PassThrough, PlayerBody};
use crate::slime::ActiveZone;

/// Dispatch this frame's actions in arrival order.
pub(crate) fn apply_actions(
    mut queue: ResMut<ActionQueue>,
    tuning: Res<CharacterTuning>,
    mut roster: ResMut<Roster>,
    mut world: AvianWorld,
    mut outbox: ResMut<Outbox>,
) {
    for (slot, action) in queue.drain() {
        let mut handle = roster.handle(slot, &mut world, &*tuning, &mut *outbox);
        action.execute(&mut handle);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_character_frame(
    time: Res<Time>,
    virtual_time: Res<Time<Virtual>>,
    tuning: Res<CharacterTuning>,
    active_zone: Res<ActiveZone>,
    mut roster: ResMut<Roster>,
    mut world: AvianWorld,
    mut outbox: ResMut<Outbox>,
    mut scores: ResMut<ScoreBoard>,
    mut rng: ResMut<AmbientRng>,
) {
    let timescale = if virtual_time.is_paused() {
        0.0
    } else {
        virtual_time.relative_speed()
    };
    let mut frame = FrameContext {
        world: &mut world,
        tuning: &*tuning,
        outbox: &mut *outbox,
        scores: &mut *scores,
        active_zone: active_zone.current(),
        rng: &mut rng.0,
    };
    roster.update(time.delta_secs(), timescale, &mut frame);
}

/// Gravity and friends: integrate each body's acceleration into its
/// velocity.
pub(crate) fn apply_body_acceleration(
    time: Res<Time>,
    mut query: Query<(&BodyAcceleration, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    for (acceleration, mut velocity) in &mut query {
        if acceleration.0 != Vec2::ZERO {
            velocity.0 += acceleration.0 * dt;
        }
    }
}

pub(crate) fn sync_collision_layers(
    mut query: Query<(&PassThrough, &mut CollisionLayers), Changed<PassThrough>>,
) {
    for (pass_through, mut layers) in &mut query {
        *layers = pass_through.collision_layers();
    }
}

pub(crate) fn sync_facing(roster: Res<Roster>, mut query: Query<(&PlayerBody, &mut Sprite)>) {
    for (body, mut sprite) in &mut query {
        let Some(character) = roster.get(body.slot) else {
            continue;
        };
        let flip = character.facing() == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}
