use bevy::prelude::*;

use super::{basic_attack, punch_region, AttackDirection, Health, PUNCH_COOLDOWN};
use crate::feedback::{CharacterEventKind, EffectKind, Feedback, Outbox, WorldCommand};
use crate::movement::physics::{BodyKind, Owner, HIT_REGION_POOL_SIZE};
use crate::movement::{Direction, Facing, GameLayer};
use crate::test_support::{grounded_roster, tuning, FakeWorld};

fn drops(outbox: &Outbox) -> Vec<(u32, Option<usize>)> {
    outbox
        .commands()
        .iter()
        .filter_map(|command| match command {
            WorldCommand::DropSlime { weight, owner, .. } => Some((*weight, *owner)),
            _ => None,
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Attack direction tests
// -----------------------------------------------------------------------------

#[test]
fn test_attack_direction_defaults_to_facing() {
    assert_eq!(
        AttackDirection::resolve(None, Facing::Left),
        AttackDirection::Left
    );
    assert_eq!(
        AttackDirection::resolve(Some(Direction::Up), Facing::Left),
        AttackDirection::Up
    );
}

#[test]
fn test_punch_region_follows_direction() {
    let forward = punch_region(None, Facing::Right);
    assert!(forward.offset.x > 0.0);
    assert!(forward.size.x > forward.size.y);

    let up = punch_region(Some(Direction::Up), Facing::Right);
    assert_eq!(up.offset.x, 0.0);
    assert!(up.offset.y > 0.0);
    assert!(up.size.y > up.size.x);

    assert!(forward.mask.has_all(GameLayer::Player));
    assert!(forward.mask.has_all(GameLayer::King));
}

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_clamps_at_zero() {
    let mut health = Health::new(3.0);
    assert_eq!(health.take_damage(2.0), 2.0);
    assert!(!health.is_dead());
    assert_eq!(health.take_damage(2.0), 1.0);
    assert!(health.is_dead());
    assert_eq!(health.percent(), 0.0);
}

// -----------------------------------------------------------------------------
// Basic attack tests
// -----------------------------------------------------------------------------

#[test]
fn test_punch_into_nothing_misses() {
    let mut world = FakeWorld::new();
    let (mut roster, _) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(roster.get(0).unwrap().attack_cooldown(), PUNCH_COOLDOWN);
    assert_eq!(outbox.count_events(CharacterEventKind::PunchMiss), 1);
    assert_eq!(
        world.last_region,
        Some(punch_region(None, Facing::Right))
    );
    assert_eq!(world.regions_released, 1);
    assert_eq!(world.pool.in_use(), 0);
    assert!(outbox
        .feedback()
        .iter()
        .any(|f| matches!(f, Feedback::Effect { kind: EffectKind::Punch, .. })));
}

#[test]
fn test_punch_during_cooldown_is_noop() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(2, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    world.region_hits = vec![bodies[1]];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);
    let after_first = outbox.feedback().len();
    roster.get_mut(0).unwrap().attack_cooldown = 0.2;
    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(world.regions_acquired, 1);
    assert_eq!(outbox.feedback().len(), after_first);
    assert_eq!(roster.get(0).unwrap().attack_cooldown(), 0.2);
}

#[test]
fn test_punch_still_steers() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    roster.get_mut(0).unwrap().attack_cooldown = 0.3;

    basic_attack(
        &mut roster,
        0,
        Some(Direction::Left),
        &mut world,
        &tuning,
        &mut outbox,
    );

    assert_eq!(world.body(bodies[0]).velocity.x, -10.0);
    assert_eq!(roster.get(0).unwrap().facing(), Facing::Left);
    assert!(outbox.is_empty());
}

#[test]
fn test_stunned_attacker_cannot_punch() {
    let mut world = FakeWorld::new();
    let (mut roster, _) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    roster.get_mut(0).unwrap().hit_stunned = true;

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(roster.get(0).unwrap().attack_cooldown(), 0.0);
    assert_eq!(world.regions_acquired, 0);
    assert!(outbox.is_empty());
}

#[test]
fn test_punch_player_knocks_back_stuns_and_drops() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(2, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    for weight in [1, 5, 1] {
        roster.get_mut(1).unwrap().add_slime(weight, &mut outbox);
    }
    let mut outbox = Outbox::default();
    world.region_hits = vec![bodies[1]];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    let target = roster.get(1).unwrap();
    assert!(target.hit_stunned());
    assert_eq!(target.bag().items(), &[1]);
    assert_eq!(world.body(bodies[1]).velocity, Vec2::new(150.0, 250.0));
    assert_eq!(drops(&outbox), vec![(5, Some(1)), (1, Some(1))]);
    assert_eq!(outbox.count_events(CharacterEventKind::PunchHit), 1);
    assert_eq!(outbox.count_events(CharacterEventKind::PunchMiss), 0);
}

#[test]
fn test_explicit_direction_sets_knockback_side() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(2, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    world.region_hits = vec![bodies[1]];

    basic_attack(
        &mut roster,
        0,
        Some(Direction::Left),
        &mut world,
        &tuning,
        &mut outbox,
    );

    assert_eq!(world.body(bodies[1]).velocity.x, -150.0);
}

#[test]
fn test_punching_stunned_player_only_drops() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(2, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    roster.get_mut(1).unwrap().add_slime(1, &mut outbox);
    roster.get_mut(1).unwrap().hit_stunned = true;
    let mut outbox = Outbox::default();
    world.set_vel(bodies[1], Vec2::new(0.0, -20.0));
    world.region_hits = vec![bodies[1]];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(world.body(bodies[1]).velocity, Vec2::new(0.0, -20.0));
    assert_eq!(drops(&outbox), vec![(1, Some(1))]);
    assert_eq!(outbox.count_events(CharacterEventKind::PunchHit), 0);
}

#[test]
fn test_player_hit_once_per_punch() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(2, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    for weight in [1, 1, 1, 1] {
        roster.get_mut(1).unwrap().add_slime(weight, &mut outbox);
    }
    let mut outbox = Outbox::default();
    let extra_collider = world.entity();
    world.owners.insert(
        extra_collider,
        Owner {
            entity: bodies[1],
            kind: BodyKind::Player(1),
        },
    );
    world.region_hits = vec![bodies[1], extra_collider];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(drops(&outbox).len(), 2);
    assert_eq!(roster.get(1).unwrap().bag().len(), 2);
    assert_eq!(outbox.count_events(CharacterEventKind::PunchHit), 1);
}

#[test]
fn test_own_colliders_are_ignored() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    let limb = world.entity();
    world.owners.insert(
        limb,
        Owner {
            entity: bodies[0],
            kind: BodyKind::Player(0),
        },
    );
    world.region_hits = vec![limb];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert!(!roster.get(0).unwrap().hit_stunned());
    assert!(outbox.commands().is_empty());
    assert_eq!(outbox.count_events(CharacterEventKind::PunchHit), 0);
}

#[test]
fn test_punch_giant_requests_damage() {
    let mut world = FakeWorld::new();
    let (mut roster, _) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    let giant = world.spawn_thing(BodyKind::Giant, Vec2::new(30.0, 50.0));
    world.region_hits = vec![giant];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(
        outbox.commands(),
        &[WorldCommand::DamageGiant {
            giant,
            amount: super::GIANT_PUNCH_DAMAGE,
            force: Vec2::new(-30.0, -50.0),
        }]
    );
    assert_eq!(outbox.count_events(CharacterEventKind::PunchHit), 1);
    assert!(outbox
        .feedback()
        .iter()
        .any(|f| matches!(f, Feedback::CameraShake { .. })));
}

#[test]
fn test_punch_creature_counts_as_miss() {
    let mut world = FakeWorld::new();
    let (mut roster, _) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    let creature = world.spawn_thing(BodyKind::Creature, Vec2::new(20.0, 0.0));
    world.region_hits = vec![creature];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(outbox.count_events(CharacterEventKind::PunchMiss), 1);
    assert!(outbox.commands().is_empty());
}

#[test]
fn test_exhausted_region_pool_drops_punch() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(2, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    let region = punch_region(None, Facing::Right);
    for _ in 0..HIT_REGION_POOL_SIZE {
        world.pool.acquire(bodies[1], region);
    }
    world.region_hits = vec![bodies[1]];

    basic_attack(&mut roster, 0, None, &mut world, &tuning, &mut outbox);

    assert_eq!(roster.get(0).unwrap().attack_cooldown(), PUNCH_COOLDOWN);
    assert!(!roster.get(1).unwrap().hit_stunned());
    assert!(outbox.is_empty());
}
