//! Movement domain: the physics collaborator backed by avian2d.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::GiantSlime;
use crate::movement::physics::{
    BodyKind, Contacts, HitRegion, HitRegionPool, Owner, PhysicsWorld, RegionId,
};
use crate::movement::{BodyAcceleration, ContactSide, GameLayer, PassThrough, PlayerBody};
use crate::slime::{Creature, ScoringZone};

/// Thickness of the strips probing each side of a body.
pub const DETECTOR_THICKNESS: f32 = 2.0;
/// Side strips cover this fraction of the body edge, so corners do not
/// register as both floor and wall.
pub const DETECTOR_SPAN: f32 = 0.8;

/// Center offset and extent of the detector on `side` of a body of `size`.
pub fn detector_shape(side: ContactSide, size: Vec2) -> (Vec2, Vec2) {
    let t = DETECTOR_THICKNESS;
    match side {
        ContactSide::Top => (
            Vec2::new(0.0, size.y * 0.5 + t * 0.5),
            Vec2::new(size.x * DETECTOR_SPAN, t),
        ),
        ContactSide::Bottom => (
            Vec2::new(0.0, -(size.y * 0.5 + t * 0.5)),
            Vec2::new(size.x * DETECTOR_SPAN, t),
        ),
        ContactSide::Left => (
            Vec2::new(-(size.x * 0.5 + t * 0.5), 0.0),
            Vec2::new(t, size.y * DETECTOR_SPAN),
        ),
        ContactSide::Right => (
            Vec2::new(size.x * 0.5 + t * 0.5, 0.0),
            Vec2::new(t, size.y * DETECTOR_SPAN),
        ),
        ContactSide::Body => (Vec2::ZERO, size),
    }
}

/// Player bodies are unit rectangles scaled by their transform, so the
/// transform scale is the world-space size.
#[derive(SystemParam)]
pub struct AvianWorld<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    transforms: Query<'w, 's, &'static mut Transform>,
    motion: Query<
        'w,
        's,
        (
            &'static mut LinearVelocity,
            &'static mut BodyAcceleration,
            &'static mut PassThrough,
        ),
    >,
    kinds: Query<
        'w,
        's,
        (
            Option<&'static PlayerBody>,
            Option<&'static GiantSlime>,
            Option<&'static Creature>,
            Option<&'static ScoringZone>,
        ),
    >,
    collider_of: Query<'w, 's, &'static ColliderOf>,
    regions: ResMut<'w, HitRegionPool>,
}

impl AvianWorld<'_, '_> {
    fn overlaps(&self, exclude: Entity, center: Vec2, size: Vec2, mask: LayerMask) -> Contacts {
        let shape = Collider::rectangle(size.x.abs(), size.y.abs());
        let filter = SpatialQueryFilter::from_mask(mask).with_excluded_entities([exclude]);
        Contacts::from_hits(self.spatial.shape_intersections(&shape, center, 0.0, &filter))
    }
}

impl PhysicsWorld for AvianWorld<'_, '_> {
    fn velocity(&self, body: Entity) -> Option<Vec2> {
        self.motion.get(body).ok().map(|(velocity, ..)| velocity.0)
    }

    fn set_velocity(&mut self, body: Entity, velocity: Vec2) {
        if let Ok((mut current, ..)) = self.motion.get_mut(body) {
            current.0 = velocity;
        }
    }

    fn set_acceleration(&mut self, body: Entity, acceleration: Vec2) {
        if let Ok((_, mut current, _)) = self.motion.get_mut(body) {
            current.0 = acceleration;
        }
    }

    fn position(&self, body: Entity) -> Option<Vec2> {
        self.transforms
            .get(body)
            .ok()
            .map(|transform| transform.translation.truncate())
    }

    fn set_position(&mut self, body: Entity, position: Vec2) {
        if let Ok(mut transform) = self.transforms.get_mut(body) {
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
    }

    fn scale(&self, body: Entity) -> Option<Vec2> {
        self.transforms
            .get(body)
            .ok()
            .map(|transform| transform.scale.truncate().abs())
    }

    fn detect(&self, body: Entity, layer: GameLayer, side: ContactSide) -> Contacts {
        let (Some(position), Some(size)) = (self.position(body), self.scale(body)) else {
            return Contacts::default();
        };
        let (offset, extent) = detector_shape(side, size);
        self.overlaps(body, position + offset, extent, layer.into())
    }

    fn set_pass_through(&mut self, body: Entity, pass_through: bool) {
        if let Ok((.., mut current)) = self.motion.get_mut(body) {
            if current.0 != pass_through {
                current.0 = pass_through;
            }
        }
    }

    fn acquire_region(&mut self, owner: Entity, region: HitRegion) -> Option<RegionId> {
        self.regions.acquire(owner, region)
    }

    fn region_overlaps(&self, region: RegionId) -> Contacts {
        let Some((owner, region)) = self.regions.get(region) else {
            return Contacts::default();
        };
        let (Some(position), Some(size)) = (self.position(owner), self.scale(owner)) else {
            return Contacts::default();
        };
        self.overlaps(owner, position + region.offset * size, region.size * size, region.mask)
    }

    fn release_region(&mut self, region: RegionId) {
        self.regions.release(region);
    }

    fn resolve(&self, collider: Entity) -> Option<Owner> {
        let entity = self
            .collider_of
            .get(collider)
            .map(|of| of.body)
            .unwrap_or(collider);
        let (player, giant, creature, zone) = self.kinds.get(entity).ok()?;
        let kind = if let Some(player) = player {
            BodyKind::Player(player.slot)
        } else if giant.is_some() {
            BodyKind::Giant
        } else if creature.is_some() {
            BodyKind::Creature
        } else if let Some(zone) = zone {
            BodyKind::Zone(zone.id)
        } else {
            BodyKind::Other
        };
        Some(Owner { entity, kind })
    }
}
