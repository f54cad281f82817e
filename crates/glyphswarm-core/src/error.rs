//! Error types for Glyphswarm

use thiserror::Error;

/// The main error type for Glyphswarm operations.
///
/// Only the configuration and asset boundary produces errors; the simulation
/// itself resolves degenerate input by clamping or returning empty results.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Font load error: {0}")]
    FontLoad(String),
}

/// Result type alias for Glyphswarm operations
pub type Result<T> = std::result::Result<T, SwarmError>;

impl From<toml::de::Error> for SwarmError {
    fn from(err: toml::de::Error) -> Self {
        SwarmError::TomlParse(err.to_string())
    }
}
