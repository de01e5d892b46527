//! Slime domain: loose slime in the arena, and the creatures that carry it.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::arena::RoundScoped;
use crate::core::AmbientRng;
use crate::feedback::{Outbox, WorldCommand};
use crate::movement::roster::Roster;
use crate::movement::{GameLayer, PlayerBody};
use crate::slime::{AddOutcome, SlimeClass};

/// Seconds before a player can pick back up slime knocked out of them.
pub const PICKUP_GRACE: f32 = 0.75;
pub const PICKUP_SIZE: f32 = 14.0;
pub const CREATURE_SIZE: Vec2 = Vec2::new(22.0, 16.0);

/// A slime lying around, waiting to be collected.
#[derive(Component, Debug, Clone, Copy)]
pub struct SlimePickup {
    pub weight: u32,
    /// Slot the slime was knocked out of
    pub owner: Option<usize>,
    pub grace: f32,
}

impl SlimePickup {
    pub fn new(weight: u32, owner: Option<usize>) -> Self {
        Self {
            weight,
            owner,
            grace: if owner.is_some() { PICKUP_GRACE } else { 0.0 },
        }
    }

    /// The slot that lost this slime has to wait out the grace period.
    pub fn collectable_by(&self, slot: usize) -> bool {
        self.owner != Some(slot) || self.grace <= 0.0
    }
}

/// A small wandering slime that can be stomped.
#[derive(Component, Debug, Clone, Copy)]
pub struct Creature {
    pub class: SlimeClass,
}

/// Keeps the arena stocked with creatures.
#[derive(Resource, Debug)]
pub struct CreatureSpawner {
    pub points: Vec<Vec2>,
    pub max_alive: usize,
    /// Chance that a new creature is golden
    pub golden_chance: f64,
    pub timer: Timer,
}

impl Default for CreatureSpawner {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            max_alive: 6,
            golden_chance: 0.1,
            timer: Timer::from_seconds(2.5, TimerMode::Repeating),
        }
    }
}

pub fn class_color(class: SlimeClass) -> Color {
    match class {
        SlimeClass::Normal => Color::srgb(0.35, 0.85, 0.4),
        SlimeClass::Golden => Color::srgb(1.0, 0.82, 0.2),
    }
}

pub fn spawn_pickup(
    commands: &mut Commands,
    position: Vec2,
    weight: u32,
    owner: Option<usize>,
) -> Entity {
    let class = SlimeClass::for_weight(weight);
    commands
        .spawn((
            SlimePickup::new(weight, owner),
            RoundScoped,
            Sprite::from_color(class_color(class), Vec2::ONE),
            Transform::from_translation(position.extend(1.0))
                .with_scale(Vec3::new(PICKUP_SIZE, PICKUP_SIZE, 1.0)),
            Collider::circle(0.5),
            Sensor,
            CollisionLayers::new(GameLayer::Pickup, [GameLayer::Player]),
        ))
        .id()
}

pub fn spawn_creature(commands: &mut Commands, position: Vec2, class: SlimeClass) -> Entity {
    commands
        .spawn((
            Creature { class },
            RoundScoped,
            Sprite::from_color(class_color(class), Vec2::ONE),
            Transform::from_translation(position.extend(0.5)).with_scale(CREATURE_SIZE.extend(1.0)),
            RigidBody::Static,
            Collider::rectangle(1.0, 1.0),
            Sensor,
            CollisionLayers::new(GameLayer::Slime, [GameLayer::Player]),
        ))
        .id()
}

pub(crate) fn tick_pickup_grace(time: Res<Time>, mut pickups: Query<&mut SlimePickup>) {
    let dt = time.delta_secs();
    for mut pickup in &mut pickups {
        if pickup.grace > 0.0 {
            pickup.grace -= dt;
        }
    }
}

/// Bodies touching a pickup try to bag it.
pub(crate) fn collect_pickups(
    mut commands: Commands,
    spatial: SpatialQuery,
    bodies: Query<(Entity, &PlayerBody, &Transform)>,
    pickups: Query<&SlimePickup>,
    mut roster: ResMut<Roster>,
    mut outbox: ResMut<Outbox>,
) {
    let mut taken: Vec<Entity> = Vec::new();
    for (body, player, transform) in &bodies {
        let Some(character) = roster.get_mut(player.slot) else {
            continue;
        };
        let size = transform.scale.truncate().abs();
        let shape = Collider::rectangle(size.x, size.y);
        let filter =
            SpatialQueryFilter::from_mask(GameLayer::Pickup).with_excluded_entities([body]);
        let hits =
            spatial.shape_intersections(&shape, transform.translation.truncate(), 0.0, &filter);

        for hit in hits {
            if taken.contains(&hit) {
                continue;
            }
            let Ok(pickup) = pickups.get(hit) else {
                continue;
            };
            if !pickup.collectable_by(player.slot) {
                continue;
            }
            match character.add_slime(pickup.weight, &mut outbox) {
                AddOutcome::Added | AddOutcome::Replaced => {
                    taken.push(hit);
                    commands.entity(hit).despawn();
                }
                AddOutcome::Rejected(_) => {}
            }
        }
    }
}

/// Stomped creatures burst into a pickup of their class.
pub(crate) fn destroy_creatures(
    mut commands: Commands,
    mut world_commands: MessageReader<WorldCommand>,
    creatures: Query<(&Creature, &Transform)>,
) {
    let mut destroyed: Vec<Entity> = Vec::new();
    for command in world_commands.read() {
        let WorldCommand::DestroyCreature { creature, by } = *command else {
            continue;
        };
        if destroyed.contains(&creature) {
            continue;
        }
        let Ok((kind, transform)) = creatures.get(creature) else {
            continue;
        };
        destroyed.push(creature);
        debug!("Slot {by} stomped a {:?} creature", kind.class);
        spawn_pickup(
            &mut commands,
            transform.translation.truncate(),
            kind.class.weight(),
            None,
        );
        commands.entity(creature).despawn();
    }
}

pub(crate) fn drop_slime(mut commands: Commands, mut world_commands: MessageReader<WorldCommand>) {
    for command in world_commands.read() {
        if let WorldCommand::DropSlime {
            position,
            weight,
            owner,
        } = *command
        {
            spawn_pickup(&mut commands, position, weight, owner);
        }
    }
}

pub(crate) fn spawn_creatures(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<CreatureSpawner>,
    mut rng: ResMut<AmbientRng>,
    creatures: Query<(), With<Creature>>,
) {
    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() || spawner.points.is_empty() {
        return;
    }
    if creatures.iter().count() >= spawner.max_alive {
        return;
    }
    let point = spawner.points[rng.0.random_range(0..spawner.points.len())];
    let class = if rng.0.random_bool(spawner.golden_chance) {
        SlimeClass::Golden
    } else {
        SlimeClass::Normal
    };
    spawn_creature(&mut commands, point, class);
    trace!("Spawned {class:?} creature at {point}");
}
