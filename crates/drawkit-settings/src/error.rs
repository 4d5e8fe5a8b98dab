//! Error types for the settings crate.
//!
//! Validation failures reuse [`drawkit_core::ConfigError`]; this module adds
//! the file and format errors of loading and saving.

use std::io;

use drawkit_core::ConfigError;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// A configuration value or format is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

impl SettingsError {
    /// Shorthand for an invalid setting wrapped in [`SettingsError::Config`].
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::Config(ConfigError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        })
    }
}

impl From<SettingsError> for drawkit_core::Error {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Config(e) => drawkit_core::Error::Config(e),
            SettingsError::IoError(e) => drawkit_core::Error::Io(e),
            SettingsError::JsonError(e) => drawkit_core::Error::Json(e),
            other => drawkit_core::Error::Config(ConfigError::Malformed(other.to_string())),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
