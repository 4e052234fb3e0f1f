//! # storefront-client: Action Dispatcher
//!
//! Async operations against the storefront REST API. Each operation checks
//! its preconditions locally, sends at most one mutating request, updates
//! the shared [`storefront_state::Store`] and reports an [`Outcome`].
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ClientConfig ──► ReqwestTransport ──┐                                 │
//! │   (TOML + env)                        │                                 │
//! │                                       ▼                                 │
//! │   Store ─────────────────────────► Dispatcher ──► Outcome<T>            │
//! │   (storefront-state)                  │                                 │
//! │                                       └── storefront-core rules         │
//! │                                           (validation, stock checks)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use storefront_client::{ClientConfig, Dispatcher};
//! use storefront_state::Store;
//!
//! # async fn run() -> storefront_client::ClientResult<()> {
//! let config = ClientConfig::load_or_default(None);
//! let store = Store::open(Arc::new(config.token_store()?));
//! let dispatcher = Dispatcher::from_config(&config, store)?;
//!
//! let outcome = dispatcher.get_categories().await;
//! if !outcome.success {
//!     eprintln!("{}", outcome.message.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//! - [`config`] - Client configuration
//! - [`dispatcher`] - The operations
//! - [`outcome`] - Result record handed to views
//! - [`transport`] - HTTP seam and its reqwest implementation
//! - [`error`] - Client error types

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod outcome;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use config::ClientConfig;
pub use dispatcher::Dispatcher;
pub use error::{ClientError, ClientResult};
pub use outcome::{FailureKind, Outcome};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};
