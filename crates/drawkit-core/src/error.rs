//! Error handling for DrawKit
//!
//! Provides error types for all layers of the geometry core:
//! - Path errors (stale partcodes, bad indices, out-of-range distances)
//! - Configuration errors (invalid or unreadable settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Path error type
///
/// Raised by mutating path operations that reference something that does
/// not exist or cannot be edited. None of these are fatal: the path is left
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The referenced point or element does not exist (or the partcode is stale)
    #[error("Not found: {what}")]
    NotFound {
        /// Description of what was looked up.
        what: String,
    },

    /// A segment index was outside the path's segment list
    #[error("Index {index} out of range for path with {len} segments")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of segments in the path.
        len: usize,
    },

    /// A numeric argument was outside its permitted range
    #[error("Argument {value} out of range [{min}, {max}]")]
    ArgumentOutOfRange {
        /// The rejected value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// The operation is not valid for the path in its current state
    #[error("Invalid state: {reason}")]
    InvalidState {
        /// The reason the operation was refused.
        reason: String,
    },
}

impl PathError {
    /// Shorthand for [`PathError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        PathError::NotFound { what: what.into() }
    }

    /// Shorthand for [`PathError::InvalidState`].
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        PathError::InvalidState {
            reason: reason.into(),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A configuration value is out of its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Dotted key of the setting.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file format is not supported
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration could not be parsed or written
    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Main error type for DrawKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Path editing error
    #[error(transparent)]
    Path(#[from] PathError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a path editing error
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this is a "not found" path error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Path(PathError::NotFound { .. }))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for path operations
pub type PathResult<T> = std::result::Result<T, PathError>;
