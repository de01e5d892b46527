//! Core domain: shared resources for session configuration and scoring.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use crate::movement::roster::MAX_PLAYERS;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    pub fn toggle(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }
}

/// Run condition: true while the simulation clock is running.
pub fn simulation_active(time: Res<Time<Virtual>>) -> bool {
    !time.is_paused() && time.relative_speed() > 0.0
}

/// Session setup fixed before the first round.
#[derive(Resource, Debug, Clone)]
pub struct SessionConfig {
    /// Local players, 1 to [`MAX_PLAYERS`]
    pub players: usize,
    /// Seed for ambient randomness; random when unset
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: 2,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn player_count(&self) -> usize {
        self.players.clamp(1, MAX_PLAYERS)
    }

    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}

/// Points delivered by each slot this round.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    scores: [u32; MAX_PLAYERS],
}

impl ScoreBoard {
    pub fn add(&mut self, slot: usize, points: u32) {
        match self.scores.get_mut(slot) {
            Some(score) => *score += points,
            None => warn!("Score for unknown slot {slot} dropped"),
        }
    }

    pub fn get(&self, slot: usize) -> u32 {
        self.scores.get(slot).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.scores = [0; MAX_PLAYERS];
    }

    /// Slot with the most points, ties going to the lower slot.
    pub fn leader(&self, players: usize) -> Option<usize> {
        let players = players.min(MAX_PLAYERS);
        (0..players).rev().max_by_key(|&slot| self.scores[slot])
    }
}

/// Randomness for cosmetic effects and creature spawns.
#[derive(Resource, Debug)]
pub struct AmbientRng(pub ChaCha8Rng);

impl AmbientRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
