//! # Action Dispatcher
//!
//! Async operations that call the storefront API, submit actions to the
//! state container and report an [`Outcome`].
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pub async fn add_to_cart(&self, product_id, quantity) -> Outcome<()>   │
//! │       │                                                                 │
//! │       ├── 1. preconditions    token? admin? form rules?                 │
//! │       │        └── fail ──► Outcome (no request sent)                   │
//! │       │                                                                 │
//! │       ├── 2. one HTTP request through HttpTransport                     │
//! │       │        └── fail ──► Outcome (network / server / decode)         │
//! │       │                                                                 │
//! │       ├── 3. Store::dispatch(action) for the new data                   │
//! │       │                                                                 │
//! │       └── 4. re-fetch the authoritative list after a mutation           │
//! │                └── fail ──► logged, outcome stays successful            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each public operation wraps a private `try_*` method that returns a
//! [`ClientResult`]; the wrapper logs failures and folds them into the
//! outcome. There is no retry and no cancellation.
//!
//! ## Submodules
//! - [`auth`] - login, registration, profile
//! - [`catalog`] - products and categories
//! - [`cart`] - server-side cart
//! - [`orders`] - order history and checkout
//! - [`admin`] - product management and user list

mod admin;
mod auth;
mod cart;
mod catalog;
mod orders;

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use storefront_state::{Action, Store};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::outcome::Outcome;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

/// Cheap-to-clone handle over the store and the transport.
#[derive(Clone)]
pub struct Dispatcher {
    store: Store,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(store: Store, transport: Arc<dyn HttpTransport>) -> Self {
        Dispatcher { store, transport }
    }

    /// Builds a dispatcher talking to the configured backend over HTTP.
    pub fn from_config(config: &ClientConfig, store: Store) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(store, Arc::new(transport)))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // =========================================================================
    // Preconditions
    // =========================================================================

    fn require_token(&self) -> ClientResult<String> {
        self.store.token().ok_or(ClientError::NotAuthenticated)
    }

    /// Token of an administrator session.
    ///
    /// Without a user record (fresh start with a stored token) the check is
    /// left to the API.
    fn require_admin(&self) -> ClientResult<String> {
        let token = self.require_token()?;
        let refused = self
            .store
            .with_snapshot(|s| s.user.as_ref().map_or(false, |u| !u.is_admin()));
        if refused {
            return Err(ClientError::Forbidden);
        }
        Ok(token)
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.transport.send(request).await
    }

    /// Sends `request` and decodes a 2xx body as `T`.
    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        self.send(request).await?.into_result()
    }

    /// Sends `request` and ignores the body of a 2xx response.
    async fn execute(&self, request: ApiRequest) -> ClientResult<()> {
        self.send(request).await?.ensure_success()?;
        Ok(())
    }

    /// Runs `work` with the loading flag raised.
    async fn with_loading<T>(&self, work: impl Future<Output = T>) -> T {
        self.store.dispatch(Action::SetLoading(true));
        let result = work.await;
        self.store.dispatch(Action::SetLoading(false));
        result
    }

    /// Logs a failed re-fetch. The mutation that triggered it already succeeded.
    fn log_resync<T>(what: &str, result: ClientResult<T>) {
        if let Err(e) = result {
            warn!(list = what, error = %e, "Re-fetch after mutation failed");
        }
    }
}

/// Folds an operation result into its outcome, logging failures.
fn finish<T>(operation: &'static str, result: ClientResult<T>) -> Outcome<T> {
    if let Err(e) = &result {
        match e {
            ClientError::Validation(_)
            | ClientError::Rule(_)
            | ClientError::NotAuthenticated
            | ClientError::Forbidden => {
                debug!(operation, error = %e, "Operation rejected locally")
            }
            _ => warn!(operation, error = %e, "Operation failed"),
        }
    }
    result.into()
}

