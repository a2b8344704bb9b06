//! Error types
//!
//! Gameplay itself never fails: illegal moves are reverted in place. These
//! errors cover construction-time configuration and the outer surfaces.

use thiserror::Error;

/// Invalid engine configuration, rejected before a game starts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("shape `{0}` has no rotation states")]
    NoRotationStates(String),
    #[error("shape `{name}` rotation {index} covers no cells")]
    EmptyRotationState { name: String, index: usize },
    #[error("shape sequence must contain at least one shape")]
    EmptySequence,
}

/// An action token that does not name any known action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown action token `{0}`")]
pub struct ParseActionError(pub String);

/// Failure to read or write the frontend settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
