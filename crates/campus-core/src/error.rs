//! Error types for the campus activity pipeline.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for every campus crate.
///
/// Typed variants with automatic conversion from the common error types
/// via `From`. Transport and status failures are what the reference loads
/// surface; the remaining variants cover configuration and local storage.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CampusError {
    /// Network or transport level failure (connection, timeout, body read)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The server answered a read request with a non-success status
    #[error("Unexpected HTTP status {status} from {resource}")]
    Status { status: u16, resource: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A form field was written with a value of the wrong shape
    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Platform (permission / picker) failure
    #[error("Platform error: {0}")]
    Platform(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CampusError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Status error
    pub fn status(status: u16, resource: impl Into<String>) -> Self {
        Self::Status {
            status,
            resource: resource.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a transport-class failure.
    ///
    /// Non-success statuses on reads are reported to the user the same way
    /// as network errors, so both count.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CampusError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CampusError>`.
pub type Result<T> = std::result::Result<T, CampusError>;
