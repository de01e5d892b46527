use bevy::prelude::*;

use super::{ArenaLayout, Block};
use crate::movement::roster::MAX_PLAYERS;

#[test]
fn test_spawn_points_cycle() {
    let layout = ArenaLayout {
        player_spawns: vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)],
        ..ArenaLayout::default()
    };
    assert_eq!(layout.spawn_point(0), Vec2::new(1.0, 0.0));
    assert_eq!(layout.spawn_point(3), Vec2::new(2.0, 0.0));
}

#[test]
fn test_no_spawn_points_uses_origin() {
    let layout = ArenaLayout {
        player_spawns: Vec::new(),
        ..ArenaLayout::default()
    };
    assert_eq!(layout.spawn_point(2), Vec2::ZERO);
}

#[test]
fn test_default_layout_is_playable() {
    let layout = ArenaLayout::default();
    assert!(layout.player_spawns.len() >= MAX_PLAYERS);
    assert!(layout.zones.len() >= 2);

    let floor = layout.solids[0];
    for slot in 0..MAX_PLAYERS {
        let spawn = layout.spawn_point(slot);
        assert!(spawn.y > layout.kill_height);
        assert!(spawn.x.abs() < floor.size.x * 0.5);
    }
}

#[test]
fn test_block_new() {
    let block = Block::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(block.center, Vec2::new(1.0, 2.0));
    assert_eq!(block.size, Vec2::new(3.0, 4.0));
}
