//! Movement domain: the physics collaborator the character core talks to.
//!
//! Characters never own their bodies. They hold an [`Entity`] id and go
//! through [`PhysicsWorld`] for every read or write; an id whose entity has
//! gone away simply yields `None` or an empty [`Contacts`].

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::{ContactSide, GameLayer};

/// Size of the fixed result list returned by every contact query.
pub const MAX_CONTACTS: usize = 5;

/// Result of a contact query: an overlap flag plus up to [`MAX_CONTACTS`]
/// overlapping colliders. Unused slots are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub collision: bool,
    pub colliders: [Option<Entity>; MAX_CONTACTS],
}

impl Contacts {
    /// Build a result from any number of hits, keeping the first few.
    pub fn from_hits(hits: impl IntoIterator<Item = Entity>) -> Self {
        let mut contacts = Self::default();
        for (slot, entity) in contacts.colliders.iter_mut().zip(hits) {
            *slot = Some(entity);
            contacts.collision = true;
        }
        contacts
    }

    /// Occupied slots, in order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.colliders.iter().flatten().copied()
    }
}

/// What a collider turned out to belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// A player body in the given roster slot
    Player(usize),
    /// The giant slime NPC
    Giant,
    /// A small stompable slime creature
    Creature,
    /// A scoring zone with its id
    Zone(u32),
    /// Anything else (world geometry, pickups, ...)
    Other,
}

/// A transient rectangular query region, expressed relative to its owner's
/// body: `offset` and `size` are multiplied by the owner's scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub offset: Vec2,
    pub size: Vec2,
    pub mask: LayerMask,
}

/// A collider resolved to the entity that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub entity: Entity,
    pub kind: BodyKind,
}

/// Handle to a region acquired from the collaborator's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

/// Narrow interface onto physics, collision and entity lookup.
pub trait PhysicsWorld {
    fn velocity(&self, body: Entity) -> Option<Vec2>;

    fn set_velocity(&mut self, body: Entity, velocity: Vec2);

    fn set_acceleration(&mut self, body: Entity, acceleration: Vec2);

    fn position(&self, body: Entity) -> Option<Vec2>;

    fn set_position(&mut self, body: Entity, position: Vec2);

    /// World-space size of the body.
    fn scale(&self, body: Entity) -> Option<Vec2>;

    /// Run the body's detector on `side` against `layer`.
    fn detect(&self, body: Entity, layer: GameLayer, side: ContactSide) -> Contacts;

    /// Assign the body's collision layers for the given pass-through state.
    fn set_pass_through(&mut self, body: Entity, pass_through: bool);

    /// Take a region from the pool. `None` when the pool is exhausted.
    fn acquire_region(&mut self, owner: Entity, region: HitRegion) -> Option<RegionId>;

    /// Colliders overlapping an acquired region, excluding its owner.
    fn region_overlaps(&self, region: RegionId) -> Contacts;

    fn release_region(&mut self, region: RegionId);

    /// Resolve the entity owning `collider`. `None` if it no longer exists.
    fn resolve(&self, collider: Entity) -> Option<Owner>;
}

/// Number of hit regions that can be out at the same time.
pub const HIT_REGION_POOL_SIZE: usize = 8;

/// Fixed pool of transient hit regions. A region lives between one
/// `acquire` and the matching `release`.
#[derive(Resource, Debug, Default)]
pub struct HitRegionPool {
    slots: [Option<(Entity, HitRegion)>; HIT_REGION_POOL_SIZE],
}

impl HitRegionPool {
    pub fn acquire(&mut self, owner: Entity, region: HitRegion) -> Option<RegionId> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some((owner, region));
        Some(RegionId(index))
    }

    pub fn get(&self, id: RegionId) -> Option<(Entity, HitRegion)> {
        self.slots.get(id.0).copied().flatten()
    }

    pub fn release(&mut self, id: RegionId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = None;
        }
    }

    pub fn in_use(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
