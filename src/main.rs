use avian2d::prelude::*;
use bevy::prelude::*;
use clap::Parser;

use slime_brawl::core::{SessionArgs, SessionConfig};
use slime_brawl::SlimeBrawlPlugins;

/// Gravity for non-player bodies; players integrate their own.
const WORLD_GRAVITY: f32 = -1800.0;

fn main() -> AppExit {
    let session = SessionConfig::from(SessionArgs::parse());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Slime Brawl".to_string(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::new(0.0, WORLD_GRAVITY)))
        .insert_resource(session)
        .add_plugins(SlimeBrawlPlugins)
        .run()
}
