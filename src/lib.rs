//! Slime Brawl: local multiplayer platform fighter. Characters run, jump,
//! punch each other and haul slime into scoring zones.

pub mod actions;
pub mod arena;
pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod feedback;
pub mod movement;
pub mod slime;

#[cfg(test)]
mod test_support;

use bevy::prelude::*;

/// Every gameplay plugin, in dependency order.
pub struct SlimeBrawlPlugins;

impl Plugin for SlimeBrawlPlugins {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            feedback::FeedbackPlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            slime::SlimePlugin,
            arena::ArenaPlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
