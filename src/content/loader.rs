//! Loader for the character globals file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::CharacterTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse character globals. `.ron` files go through RON, everything else
/// is read as JSON.
pub fn parse_character_tuning(file: &str, contents: &str) -> Result<CharacterTuning, ContentLoadError> {
    let parsed = if file.ends_with(".ron") {
        ron_options()
            .from_str::<CharacterTuning>(contents)
            .map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<CharacterTuning>(contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| ContentLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })
}

/// Read and parse the character globals file.
pub fn load_character_tuning(path: &Path) -> Result<CharacterTuning, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_character_tuning(&file_name, &contents)
}
