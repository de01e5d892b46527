//! Validation for loaded character globals.

use crate::movement::CharacterTuning;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub requirement: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Character global '{}' = {} must be {}",
            self.field, self.value, self.requirement
        )
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for checking a numeric field
macro_rules! check_field {
    ($errors:expr, $tuning:expr, $field:ident, $requirement:expr, $ok:expr) => {
        if !$ok(&$tuning.$field) {
            $errors.push(ValidationError {
                field: stringify!($field),
                value: $tuning.$field.to_string(),
                requirement: $requirement,
            });
        }
    };
}

/// Validate every tunable. Returns a list of validation errors, empty if
/// the values are usable.
pub fn validate_tuning(tuning: &CharacterTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let positive = |v: &f32| v.is_finite() && *v > 0.0;
    let finite = |v: &f32| v.is_finite();
    let at_least_one = |v: &u32| *v >= 1;
    check_field!(errors, tuning, acceleration, "a positive number", positive);
    check_field!(errors, tuning, jump_speed, "a positive number", positive);
    check_field!(errors, tuning, max_speed, "a positive number", positive);
    check_field!(errors, tuning, gravity, "a finite number", finite);
    check_field!(errors, tuning, drag, "at least 1", at_least_one);

    errors
}
