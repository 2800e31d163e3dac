//! Error types for spectral_anchorage
//!
//! The engine works purely over in-memory values, so the only failures are
//! caller contract violations: malformed options or inconsistent build inputs.
//! An empty result set is never an error.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AnchorageError>;

/// Main error type for spectral_anchorage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnchorageError {
    /// A configuration value is outside its valid domain
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Build inputs are inconsistent with each other (e.g. label count mismatch)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AnchorageError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's options or inputs
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for AnchorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
