//! Configuration errors for card-sparks

use thiserror::Error;

/// Raised while turning command line input into simulation parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid window size {0:?}, expected WIDTH,HEIGHT")]
    InvalidWindowSize(String),

    #[error("Invalid range {0:?}, expected MIN,MAX")]
    InvalidRange(String),

    #[error("Range for {name} is inverted: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },

    #[error("Decay must be positive, got a minimum of {0}")]
    NonPositiveDecay(f32),

    #[error("Invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Damping must be in (0, 1], got {0}")]
    InvalidDamping(f32),

    #[error("Gravity must be finite and non-negative, got {0}")]
    InvalidGravity(f32),
}
