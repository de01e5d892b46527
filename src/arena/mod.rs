//! Arena domain: stage geometry, scoring zones and player bodies for a
//! round.

#[cfg(test)]
mod tests;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{GiantSlime, Health, GIANT_HEALTH};
use crate::core::GameState;
use crate::feedback::TEAM_COLORS;
use crate::movement::physics::PhysicsWorld;
use crate::movement::{
    AvianWorld, BodyAcceleration, CharacterSet, GameLayer, GhostPlatform, Ground, PassThrough,
    PlayerBody, Roster,
};
use crate::slime::{ActiveZone, CreatureSpawner, ScoringZone};

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 40.0);
pub const GIANT_SIZE: Vec2 = Vec2::new(80.0, 64.0);

/// Despawned when the round ends.
#[derive(Component, Debug, Default)]
pub struct RoundScoped;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub center: Vec2,
    pub size: Vec2,
}

impl Block {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

/// Where everything goes in the stage.
#[derive(Resource, Debug, Clone)]
pub struct ArenaLayout {
    /// Floors, walls and ceilings
    pub solids: Vec<Block>,
    /// One-way platforms
    pub ghosts: Vec<Block>,
    pub zones: Vec<Block>,
    pub player_spawns: Vec<Vec2>,
    pub creature_spawns: Vec<Vec2>,
    pub giant_spawn: Option<Vec2>,
    /// Bodies below this height are put back on a spawn point
    pub kill_height: f32,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            solids: vec![
                Block::new(0.0, -260.0, 1000.0, 40.0),
                Block::new(-500.0, 0.0, 40.0, 560.0),
                Block::new(500.0, 0.0, 40.0, 560.0),
                Block::new(0.0, 300.0, 1000.0, 40.0),
                Block::new(-120.0, -160.0, 30.0, 160.0),
            ],
            ghosts: vec![
                Block::new(-280.0, -100.0, 160.0, 12.0),
                Block::new(280.0, -40.0, 160.0, 12.0),
                Block::new(0.0, 60.0, 200.0, 12.0),
            ],
            zones: vec![
                Block::new(-400.0, -210.0, 120.0, 60.0),
                Block::new(400.0, -210.0, 120.0, 60.0),
            ],
            player_spawns: vec![
                Vec2::new(-300.0, -200.0),
                Vec2::new(300.0, -200.0),
                Vec2::new(-150.0, 100.0),
                Vec2::new(150.0, 100.0),
            ],
            creature_spawns: vec![
                Vec2::new(-280.0, -86.0),
                Vec2::new(280.0, -26.0),
                Vec2::new(0.0, 74.0),
                Vec2::new(60.0, -232.0),
            ],
            giant_spawn: Some(Vec2::new(0.0, 160.0)),
            kill_height: -600.0,
        }
    }
}

impl ArenaLayout {
    /// Spawn point for a slot, cycling when there are more slots than
    /// points.
    pub fn spawn_point(&self, slot: usize) -> Vec2 {
        if self.player_spawns.is_empty() {
            return Vec2::ZERO;
        }
        self.player_spawns[slot % self.player_spawns.len()]
    }
}

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaLayout>()
            .add_systems(
                OnEnter(GameState::Round),
                (spawn_arena, spawn_players, spawn_giant),
            )
            .add_systems(OnExit(GameState::Round), cleanup_round)
            .add_systems(
                Update,
                respawn_fallen
                    .in_set(CharacterSet::Act)
                    .run_if(in_state(GameState::Round)),
            );
    }
}

fn spawn_arena(
    mut commands: Commands,
    layout: Res<ArenaLayout>,
    mut active_zone: ResMut<ActiveZone>,
    mut spawner: ResMut<CreatureSpawner>,
) {
    let solid_color = Color::srgb(0.3, 0.3, 0.4);
    let ghost_color = Color::srgb(0.5, 0.4, 0.3);
    let zone_color = Color::srgba(0.9, 0.9, 0.3, 0.25);

    for block in &layout.solids {
        commands.spawn((
            Ground,
            RoundScoped,
            Sprite::from_color(solid_color, block.size),
            Transform::from_translation(block.center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
            CollisionLayers::new(GameLayer::World, [GameLayer::Player, GameLayer::King]),
        ));
    }

    for block in &layout.ghosts {
        commands.spawn((
            GhostPlatform,
            RoundScoped,
            Sprite::from_color(ghost_color, block.size),
            Transform::from_translation(block.center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
            CollisionLayers::new(GameLayer::Ghost, [GameLayer::Player]),
        ));
    }

    active_zone.clear();
    for (id, block) in (0u32..).zip(&layout.zones) {
        commands.spawn((
            ScoringZone { id },
            RoundScoped,
            Sprite::from_color(zone_color, block.size),
            Transform::from_translation(block.center.extend(-1.0)),
            Collider::rectangle(block.size.x, block.size.y),
            Sensor,
            CollisionLayers::new(GameLayer::Goal, [GameLayer::Player]),
        ));
        active_zone.register(id);
    }

    spawner.points = layout.creature_spawns.clone();
    info!(
        "Arena spawned: {} solids, {} platforms, {} zones",
        layout.solids.len(),
        layout.ghosts.len(),
        layout.zones.len()
    );
}

fn spawn_players(mut commands: Commands, layout: Res<ArenaLayout>, mut roster: ResMut<Roster>) {
    for slot in 0..roster.len() {
        let position = layout.spawn_point(slot);
        let pass_through = PassThrough::default();
        let body = commands
            .spawn((
                PlayerBody { slot },
                RoundScoped,
                Sprite::from_color(TEAM_COLORS[slot % TEAM_COLORS.len()], Vec2::ONE),
                Transform::from_translation(position.extend(2.0))
                    .with_scale(PLAYER_SIZE.extend(1.0)),
                (
                    RigidBody::Dynamic,
                    Collider::rectangle(1.0, 1.0),
                    LockedAxes::ROTATION_LOCKED,
                    GravityScale(0.0),
                    Friction::new(0.0),
                    pass_through.collision_layers(),
                ),
                pass_through,
                BodyAcceleration::default(),
            ))
            .id();
        roster.attach_body(slot, body);
        debug!("Slot {slot} body {body:?} at {position}");
    }
}

fn spawn_giant(mut commands: Commands, layout: Res<ArenaLayout>) {
    let Some(position) = layout.giant_spawn else {
        return;
    };
    commands.spawn((
        GiantSlime,
        Health::new(GIANT_HEALTH),
        RoundScoped,
        Sprite::from_color(Color::srgb(0.3, 0.75, 0.35), Vec2::ONE),
        Transform::from_translation(position.extend(1.0)).with_scale(GIANT_SIZE.extend(1.0)),
        RigidBody::Dynamic,
        Collider::rectangle(1.0, 1.0),
        LockedAxes::ROTATION_LOCKED,
        CollisionLayers::new(GameLayer::King, [GameLayer::World]),
    ));
}

fn respawn_fallen(layout: Res<ArenaLayout>, roster: Res<Roster>, mut world: AvianWorld) {
    for character in roster.iter() {
        let Some(body) = character.body() else {
            continue;
        };
        let fell = world
            .position(body)
            .is_some_and(|position| position.y < layout.kill_height);
        if fell {
            let spawn = layout.spawn_point(character.id());
            roster.place(character.id(), spawn, &mut world);
            info!("Slot {} fell out, respawned at {spawn}", character.id());
        }
    }
}

fn cleanup_round(
    mut commands: Commands,
    query: Query<Entity, With<RoundScoped>>,
    mut roster: ResMut<Roster>,
) {
    roster.shutdown();
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
