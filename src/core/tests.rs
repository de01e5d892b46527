use clap::Parser;

use super::{GameplayPaused, ScoreBoard, SessionArgs, SessionConfig};
use crate::movement::roster::MAX_PLAYERS;

// -----------------------------------------------------------------------------
// Score board tests
// -----------------------------------------------------------------------------

#[test]
fn test_scores_accumulate_per_slot() {
    let mut scores = ScoreBoard::default();
    scores.add(0, 5);
    scores.add(0, 1);
    scores.add(2, 3);

    assert_eq!(scores.get(0), 6);
    assert_eq!(scores.get(1), 0);
    assert_eq!(scores.get(2), 3);

    scores.reset();
    assert_eq!(scores.get(0), 0);
}

#[test]
fn test_unknown_slot_scores_nothing() {
    let mut scores = ScoreBoard::default();
    scores.add(MAX_PLAYERS, 5);
    assert_eq!(scores.get(MAX_PLAYERS), 0);
    assert_eq!(scores, ScoreBoard::default());
}

#[test]
fn test_leader_ties_go_to_lower_slot() {
    let mut scores = ScoreBoard::default();
    assert_eq!(scores.leader(0), None);
    assert_eq!(scores.leader(3), Some(0));

    scores.add(1, 4);
    scores.add(2, 4);
    assert_eq!(scores.leader(3), Some(1));

    scores.add(3, 9);
    assert_eq!(scores.leader(3), Some(1));
    assert_eq!(scores.leader(4), Some(3));
}

// -----------------------------------------------------------------------------
// Session config tests
// -----------------------------------------------------------------------------

#[test]
fn test_player_count_is_clamped() {
    let config = SessionConfig {
        players: 0,
        seed: None,
    };
    assert_eq!(config.player_count(), 1);

    let config = SessionConfig {
        players: 12,
        seed: None,
    };
    assert_eq!(config.player_count(), MAX_PLAYERS);
}

#[test]
fn test_explicit_seed_is_kept() {
    let config = SessionConfig {
        seed: Some(42),
        ..SessionConfig::default()
    };
    assert_eq!(config.resolved_seed(), 42);
    assert_eq!(config.player_count(), 2);
}

// -----------------------------------------------------------------------------
// Pause tests
// -----------------------------------------------------------------------------

#[test]
fn test_pause_sources_stack() {
    let mut paused = GameplayPaused::default();
    paused.pause("menu");
    paused.pause("debug");
    paused.unpause("menu");
    assert!(paused.is_paused());

    paused.unpause("debug");
    assert!(!paused.is_paused());
}

#[test]
fn test_pause_toggle() {
    let mut paused = GameplayPaused::default();
    paused.toggle("menu");
    assert!(paused.is_paused());
    paused.toggle("menu");
    assert!(!paused.is_paused());
}

// -----------------------------------------------------------------------------
// Command line tests
// -----------------------------------------------------------------------------

#[test]
fn test_args_default_session() {
    let args = SessionArgs::try_parse_from(["slime-brawl"]).unwrap();
    let config = SessionConfig::from(args);
    assert_eq!(config.players, 2);
    assert_eq!(config.seed, None);
}

#[test]
fn test_args_players_and_seed() {
    let args =
        SessionArgs::try_parse_from(["slime-brawl", "--players", "3", "--seed", "7"]).unwrap();
    let config = SessionConfig::from(args);
    assert_eq!(config.player_count(), 3);
    assert_eq!(config.resolved_seed(), 7);
}

#[test]
fn test_args_reject_bad_values() {
    for bad in [
        &["slime-brawl", "--players", "abc"][..],
        &["slime-brawl", "--players", "0"],
        &["slime-brawl", "--players", "5"],
        &["slime-brawl", "--seed", "-1"],
        &["slime-brawl", "--speed", "3"],
    ] {
        assert!(SessionArgs::try_parse_from(bad).is_err(), "{bad:?} parsed");
    }
}
