use bevy::prelude::*;

use super::{Action, ActionQueue};
use crate::feedback::{CharacterEventKind, Outbox};
use crate::movement::{Direction, Facing};
use crate::test_support::{grounded_roster, tuning, FakeWorld};

// -----------------------------------------------------------------------------
// Vocabulary tests
// -----------------------------------------------------------------------------

#[test]
fn test_directionless_actions() {
    assert_eq!(Action::Block.direction(), None);
    assert_eq!(Action::ReleaseJump.direction(), None);
    assert_eq!(
        Action::Block.with_direction(Some(Direction::Up)),
        Action::Block
    );
    assert_eq!(
        Action::ReleaseJump.with_direction(Some(Direction::Left)),
        Action::ReleaseJump
    );
}

#[test]
fn test_with_direction_retargets() {
    let action = Action::Jump(None).with_direction(Some(Direction::Down));
    assert_eq!(action, Action::Jump(Some(Direction::Down)));
    assert_eq!(action.direction(), Some(Direction::Down));
    assert_eq!(
        Action::BasicAttack(Some(Direction::Up)).with_direction(None),
        Action::BasicAttack(None)
    );
}

// -----------------------------------------------------------------------------
// Dispatch tests
// -----------------------------------------------------------------------------

#[test]
fn test_move_dispatches_to_move() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();

    let mut handle = roster.handle(0, &mut world, &tuning, &mut outbox);
    Action::Move(Some(Direction::Left)).execute(&mut handle);

    assert_eq!(world.body(bodies[0]).velocity, Vec2::new(-10.0, 0.0));
    assert_eq!(roster.get(0).unwrap().facing(), Facing::Left);
    assert!(outbox.is_empty());
}

#[test]
fn test_jump_dispatches_to_jump() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();

    let mut handle = roster.handle(0, &mut world, &tuning, &mut outbox);
    Action::Jump(None).execute(&mut handle);

    assert_eq!(world.body(bodies[0]).velocity.y, 100.0);
    assert_eq!(outbox.count_events(CharacterEventKind::Jump), 1);
}

#[test]
fn test_basic_attack_dispatches_to_attack() {
    let mut world = FakeWorld::new();
    let (mut roster, _) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();

    let mut handle = roster.handle(0, &mut world, &tuning, &mut outbox);
    Action::BasicAttack(None).execute(&mut handle);

    assert_eq!(roster.get(0).unwrap().attack_cooldown(), 0.5);
    assert_eq!(outbox.count_events(CharacterEventKind::PunchMiss), 1);
}

#[test]
fn test_release_jump_dispatch() {
    let mut world = FakeWorld::new();
    let (mut roster, _) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();
    roster.get_mut(0).unwrap().velocity_capped = true;

    let mut handle = roster.handle(0, &mut world, &tuning, &mut outbox);
    Action::ReleaseJump.execute(&mut handle);

    assert!(!roster.get(0).unwrap().velocity_capped());
}

#[test]
fn test_reserved_actions_do_nothing() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();

    let mut handle = roster.handle(0, &mut world, &tuning, &mut outbox);
    Action::Block.execute(&mut handle);
    Action::SpecialAttack(Some(Direction::Left)).execute(&mut handle);

    assert_eq!(world.body(bodies[0]).velocity, Vec2::ZERO);
    assert_eq!(roster.get(0).unwrap().facing(), Facing::Right);
    assert!(outbox.is_empty());
}

#[test]
fn test_unknown_slot_is_ignored() {
    let mut world = FakeWorld::new();
    let (mut roster, bodies) = grounded_roster(1, &mut world);
    let tuning = tuning();
    let mut outbox = Outbox::default();

    let mut handle = roster.handle(3, &mut world, &tuning, &mut outbox);
    assert_eq!(handle.slot(), 3);
    Action::Jump(Some(Direction::Right)).execute(&mut handle);
    Action::BasicAttack(None).execute(&mut handle);

    assert_eq!(world.body(bodies[0]).velocity, Vec2::ZERO);
    assert!(outbox.is_empty());
}

// -----------------------------------------------------------------------------
// Queue tests
// -----------------------------------------------------------------------------

#[test]
fn test_queue_drains_in_order() {
    let mut queue = ActionQueue::default();
    queue.push(1, Action::Block);
    queue.push(0, Action::Jump(None));
    assert_eq!(queue.len(), 2);

    let drained: Vec<_> = queue.drain().collect();
    assert_eq!(drained, vec![(1, Action::Block), (0, Action::Jump(None))]);
    assert!(queue.is_empty());
}
