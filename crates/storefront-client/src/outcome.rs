//! # Outcome
//!
//! The uniform result of every dispatcher operation. Outcomes are returned,
//! never raised: a failed login and a dropped connection both come back as a
//! value the caller can render.
//!
//! ## Serialized Form
//! ```json
//! { "success": true,  "data": [ ... ] }
//! { "success": false, "message": "Login required", "failure": { "kind": "precondition" } }
//! { "success": false, "message": "Invalid credentials", "failure": { "kind": "server", "status": 401 } }
//! ```

use serde::Serialize;

use crate::error::ClientError;

/// Why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// No response from the API.
    Network,
    /// The API answered with an error status.
    Server { status: u16 },
    /// A local requirement was not met (no token, not an administrator).
    /// No request was sent.
    Precondition,
    /// Form input failed client-side rules. No request was sent.
    Validation,
    /// The API answered but the body could not be read.
    Decode,
}

impl From<&ClientError> for FailureKind {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Network(_) => FailureKind::Network,
            ClientError::Api { status, .. } => FailureKind::Server { status: *status },
            ClientError::Decode(_) => FailureKind::Decode,
            ClientError::Validation(_) | ClientError::Rule(_) => FailureKind::Validation,
            ClientError::NotAuthenticated
            | ClientError::Forbidden
            | ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_)
            | ClientError::Encode(_)
            | ClientError::State(_)
            | ClientError::Io(_) => FailureKind::Precondition,
        }
    }
}

/// Success flag, optional data and optional message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl<T> Outcome<T> {
    /// A success carrying `data`.
    pub fn ok(data: T) -> Self {
        Outcome {
            success: true,
            data: Some(data),
            message: None,
            failure: None,
        }
    }

    /// A failure of the given kind.
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome {
            success: false,
            data: None,
            message: Some(message.into()),
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Transforms the data of a successful outcome.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            failure: self.failure,
        }
    }
}

impl Outcome<()> {
    /// A success with no data.
    pub fn done() -> Self {
        Outcome {
            success: true,
            data: None,
            message: None,
            failure: None,
        }
    }
}

impl<T> From<ClientError> for Outcome<T> {
    fn from(err: ClientError) -> Self {
        Outcome::failed(FailureKind::from(&err), err.to_string())
    }
}

impl<T> From<Result<T, ClientError>> for Outcome<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Outcome::ok(data),
            Err(err) => err.into(),
        }
    }
}
