//! Core domain: session lifecycle and the simulation clock.

use bevy::app::AppExit;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::resources::{AmbientRng, GameplayPaused, ScoreBoard, SessionConfig};
use crate::movement::roster::Roster;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Create the roster and seed ambient randomness once per session.
pub(crate) fn start_session(mut commands: Commands, config: Res<SessionConfig>) {
    let players = config.player_count();
    let seed = config.resolved_seed();
    commands.insert_resource(Roster::new(players));
    commands.insert_resource(AmbientRng::seeded(seed));
    info!("Starting session with {players} players, seed: {seed}");
}

pub(crate) fn begin_round(mut roster: ResMut<Roster>, mut scores: ResMut<ScoreBoard>) {
    roster.reset_round();
    scores.reset();
    info!("Round started");
}

pub(crate) fn toggle_pause(keyboard: Res<ButtonInput<KeyCode>>, mut paused: ResMut<GameplayPaused>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        paused.toggle("menu");
        info!("Gameplay paused: {}", paused.is_paused());
    }
}

/// Stop the virtual clock while anything holds a pause.
pub(crate) fn sync_virtual_clock(paused: Res<GameplayPaused>, mut time: ResMut<Time<Virtual>>) {
    if !paused.is_changed() {
        return;
    }
    if paused.is_paused() {
        time.pause();
    } else {
        time.unpause();
    }
}

pub(crate) fn end_session(
    mut exits: MessageReader<AppExit>,
    roster: Option<ResMut<Roster>>,
    scores: Res<ScoreBoard>,
) {
    if exits.read().next().is_none() {
        return;
    }
    let Some(mut roster) = roster else {
        return;
    };
    if let Some(leader) = scores.leader(roster.len()) {
        info!("Session over, slot {leader} leads with {}", scores.get(leader));
    }
    roster.shutdown();
}
