//! Error types shared across the Quadra client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Quadra client.
///
/// The variants mirror the failure taxonomy every screen is expected to
/// handle: transport failures, rejected credentials, backend validation
/// messages, server-side faults, router misuse, and the client's own
/// storage problems. Every variant carries a human-readable message so
/// callers can surface it inline without further mapping.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuadraError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the credentials (HTTP 401/403).
    ///
    /// Fatal to the session: callers must treat this as an invalidated
    /// token and force a sign-out.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The backend (or a local precondition) rejected the input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The backend failed (5xx) or returned an unexpected status.
    #[error("server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// `go_back` was called with no previous screen recorded.
    #[error("no previous screen to go back to")]
    NoPreviousScreen,

    /// Durable client-side storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error (base URL, paths)
    #[error("configuration error: {0}")]
    Config(String),
}

impl QuadraError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a ServerError with the given HTTP status
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this failure is worth retrying by the user.
    ///
    /// Returns true for transport faults and server-side errors, where
    /// the same input may succeed later. Validation and authorization
    /// failures need a different input (or a fresh session) first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ServerError { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for QuadraError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for QuadraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for QuadraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for QuadraError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, QuadraError>`.
pub type Result<T> = std::result::Result<T, QuadraError>;
