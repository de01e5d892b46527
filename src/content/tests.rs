use std::path::Path;

use super::{load_character_tuning, parse_character_tuning, validate_tuning, CHARACTER_GLOBALS_PATH};
use crate::movement::CharacterTuning;

const GLOBALS_JSON: &str =
    r#"{ "acceleration": 40, "jumpspeed": 700, "maxspeed": 320, "gravity": -1800, "drag": 2 }"#;

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_parse_json_globals() {
    let tuning = parse_character_tuning("character_globals.json", GLOBALS_JSON).unwrap();
    assert_eq!(tuning, CharacterTuning::default());
}

#[test]
fn test_parse_ron_globals() {
    let ron = "(acceleration: 10.0, jumpspeed: 500.0, maxspeed: 100.0, gravity: -1000.0, drag: 3)";
    let tuning = parse_character_tuning("globals.ron", ron).unwrap();
    assert_eq!(tuning.jump_speed, 500.0);
    assert_eq!(tuning.drag, 3);
}

#[test]
fn test_missing_field_names_the_file() {
    let err = parse_character_tuning(
        "character_globals.json",
        r#"{ "acceleration": 40, "maxspeed": 320, "gravity": -1800, "drag": 2 }"#,
    )
    .unwrap_err();
    assert_eq!(err.file, "character_globals.json");
    assert!(err.message.contains("jumpspeed"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_character_tuning(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn test_bundled_globals_are_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CHARACTER_GLOBALS_PATH);
    let tuning = load_character_tuning(&path).unwrap();
    assert!(validate_tuning(&tuning).is_empty());
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_defaults_validate() {
    assert!(validate_tuning(&CharacterTuning::default()).is_empty());
}

#[test]
fn test_validation_reports_every_bad_field() {
    let tuning = CharacterTuning {
        acceleration: 0.0,
        max_speed: f32::NAN,
        drag: 0,
        ..CharacterTuning::default()
    };
    let fields: Vec<&str> = validate_tuning(&tuning).iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["acceleration", "max_speed", "drag"]);
}

#[test]
fn test_validation_message() {
    let tuning = CharacterTuning {
        jump_speed: -5.0,
        ..CharacterTuning::default()
    };
    let errors = validate_tuning(&tuning);
    assert_eq!(
        errors[0].to_string(),
        "Character global 'jump_speed' = -5 must be a positive number"
    );
}
