//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     API                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Api { status }         │ │
//! │  │  InvalidUrl     │  │                 │  │  Decode                 │ │
//! │  │  ConfigLoad/Save│  │  Encode         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Precondition   │  │     Local       │                              │
//! │  │                 │  │                 │                              │
//! │  │  NotAuthenticated│ │  Validation     │                              │
//! │  │  Forbidden      │  │  Rule, State    │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dispatcher operations never return these directly; they are folded into
//! an [`Outcome`](crate::outcome::Outcome).

use storefront_core::{CoreError, ValidationError};
use storefront_state::StateError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport & API Errors
    // =========================================================================
    /// No response: connection refused, DNS failure, timeout.
    #[error("Connection error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The API answered successfully but the body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// An outgoing request body could not be serialized. Nothing was sent.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    // =========================================================================
    // Preconditions
    // =========================================================================
    #[error("Login required")]
    NotAuthenticated,

    #[error("Administrator access required")]
    Forbidden,

    // =========================================================================
    // Local Errors
    // =========================================================================
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Rule(#[from] CoreError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Network("request timed out".to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ClientError::NotAuthenticated.to_string(), "Login required");

        let err = ClientError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");

        let err: ClientError = ValidationError::Expired.into();
        assert_eq!(err.to_string(), "card has expired");
    }

    #[test]
    fn test_url_error_conversion() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
