//! # CLI Error Type
//!
//! Failures that stop a command before it produces an outcome.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subcommand                                                             │
//! │      │                                                                  │
//! │      ├── setup fails (config, storage, HTTP client) ──► CliError ──►    │
//! │      │                                               stderr, exit 1     │
//! │      │                                                                  │
//! │      └── dispatcher operation ──► Outcome (success or failure)          │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                               stdout JSON, exit 0 / 1                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failed operations are not errors here: the dispatcher already turned them
//! into a failure [`Outcome`](storefront_client::Outcome), which is printed
//! like any other.

use storefront_client::ClientError;
use storefront_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// An argument failed a form rule before any operation ran.
    #[error("Invalid argument: {0}")]
    Argument(#[from] ValidationError),

    #[error("Could not write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
