//! In-memory physics collaborator for exercising the character core
//! without an app.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::movement::physics::{
    BodyKind, Contacts, HitRegion, HitRegionPool, Owner, PhysicsWorld, RegionId,
};
use crate::movement::{CharacterTuning, ContactSide, GameLayer, Roster};

#[derive(Debug, Clone, Copy)]
pub struct FakeBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub scale: Vec2,
    pub pass_through: bool,
}

/// Scripted world: tests decide what every detector and region reports.
pub struct FakeWorld {
    entities: World,
    pub bodies: HashMap<Entity, FakeBody>,
    pub contacts: HashMap<(Entity, GameLayer, ContactSide), Vec<Entity>>,
    pub owners: HashMap<Entity, Owner>,
    /// What every acquired region overlaps
    pub region_hits: Vec<Entity>,
    pub pool: HitRegionPool,
    pub last_region: Option<HitRegion>,
    pub regions_acquired: usize,
    pub regions_released: usize,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self {
            entities: World::new(),
            bodies: HashMap::new(),
            contacts: HashMap::new(),
            owners: HashMap::new(),
            region_hits: Vec::new(),
            pool: HitRegionPool::default(),
            last_region: None,
            regions_acquired: 0,
            regions_released: 0,
        }
    }

    pub fn entity(&mut self) -> Entity {
        self.entities.spawn_empty().id()
    }

    pub fn spawn_body(&mut self, position: Vec2) -> Entity {
        let body = self.entity();
        self.bodies.insert(
            body,
            FakeBody {
                position,
                velocity: Vec2::ZERO,
                acceleration: Vec2::ZERO,
                scale: Vec2::new(24.0, 40.0),
                pass_through: false,
            },
        );
        body
    }

    /// A collider owned by itself, of the given kind.
    pub fn spawn_thing(&mut self, kind: BodyKind, position: Vec2) -> Entity {
        let entity = self.spawn_body(position);
        self.owners.insert(entity, Owner { entity, kind });
        entity
    }

    pub fn remove(&mut self, entity: Entity) {
        self.bodies.remove(&entity);
        self.owners.remove(&entity);
    }

    pub fn touch(&mut self, body: Entity, layer: GameLayer, side: ContactSide, colliders: &[Entity]) {
        self.contacts.insert((body, layer, side), colliders.to_vec());
    }

    pub fn untouch(&mut self, body: Entity, layer: GameLayer, side: ContactSide) {
        self.contacts.remove(&(body, layer, side));
    }

    pub fn body(&self, body: Entity) -> FakeBody {
        self.bodies[&body]
    }

    pub fn set_vel(&mut self, body: Entity, velocity: Vec2) {
        if let Some(state) = self.bodies.get_mut(&body) {
            state.velocity = velocity;
        }
    }
}

impl PhysicsWorld for FakeWorld {
    fn velocity(&self, body: Entity) -> Option<Vec2> {
        self.bodies.get(&body).map(|b| b.velocity)
    }

    fn set_velocity(&mut self, body: Entity, velocity: Vec2) {
        self.set_vel(body, velocity);
    }

    fn set_acceleration(&mut self, body: Entity, acceleration: Vec2) {
        if let Some(state) = self.bodies.get_mut(&body) {
            state.acceleration = acceleration;
        }
    }

    fn position(&self, body: Entity) -> Option<Vec2> {
        self.bodies.get(&body).map(|b| b.position)
    }

    fn set_position(&mut self, body: Entity, position: Vec2) {
        if let Some(state) = self.bodies.get_mut(&body) {
            state.position = position;
        }
    }

    fn scale(&self, body: Entity) -> Option<Vec2> {
        self.bodies.get(&body).map(|b| b.scale)
    }

    fn detect(&self, body: Entity, layer: GameLayer, side: ContactSide) -> Contacts {
        self.contacts
            .get(&(body, layer, side))
            .map(|hits| Contacts::from_hits(hits.iter().copied()))
            .unwrap_or_default()
    }

    fn set_pass_through(&mut self, body: Entity, pass_through: bool) {
        if let Some(state) = self.bodies.get_mut(&body) {
            state.pass_through = pass_through;
        }
    }

    fn acquire_region(&mut self, owner: Entity, region: HitRegion) -> Option<RegionId> {
        let id = self.pool.acquire(owner, region)?;
        self.regions_acquired += 1;
        self.last_region = Some(region);
        Some(id)
    }

    fn region_overlaps(&self, region: RegionId) -> Contacts {
        let Some((owner, _)) = self.pool.get(region) else {
            return Contacts::default();
        };
        Contacts::from_hits(self.region_hits.iter().copied().filter(|hit| *hit != owner))
    }

    fn release_region(&mut self, region: RegionId) {
        self.pool.release(region);
        self.regions_released += 1;
    }

    fn resolve(&self, collider: Entity) -> Option<Owner> {
        self.owners.get(&collider).copied()
    }
}

/// A roster whose slots all have bodies standing on solid ground, spaced
/// 100 units apart.
pub fn grounded_roster(players: usize, world: &mut FakeWorld) -> (Roster, Vec<Entity>) {
    let mut roster = Roster::new(players);
    let floor = world.spawn_thing(BodyKind::Other, Vec2::new(0.0, -100.0));
    let mut bodies = Vec::new();
    for slot in 0..players {
        let body = world.spawn_thing(BodyKind::Player(slot), Vec2::new(slot as f32 * 100.0, 0.0));
        world.touch(body, GameLayer::World, ContactSide::Bottom, &[floor]);
        roster.attach_body(slot, body);
        bodies.push(body);
    }
    (roster, bodies)
}

/// Tunables with round numbers: increment 100, air acceleration 5.
pub fn tuning() -> CharacterTuning {
    CharacterTuning {
        acceleration: 10.0,
        jump_speed: 500.0,
        max_speed: 100.0,
        gravity: -1000.0,
        drag: 2,
    }
}
