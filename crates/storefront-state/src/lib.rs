//! # storefront-state: State Container
//!
//! Holds the single [`Snapshot`] of client-visible data and applies
//! [`Action`]s to it.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        State Container                                  │
//! │                                                                         │
//! │   dispatcher ──► Store::dispatch(action)                                │
//! │                        │                                                │
//! │                        ├── reduce(&snapshot, &action) ──► new Snapshot  │
//! │                        │       (pure, total over the closed enum)       │
//! │                        │                                                │
//! │                        ├── SetToken / Logout ──► TokenStore             │
//! │                        │       (only side effects in this crate)        │
//! │                        │                                                │
//! │                        └── watch::Sender::send_modify(reduce)           │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                        subscribers observe the new snapshot             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`snapshot`] - The snapshot record
//! - [`action`] - Closed action set and tagged decoding
//! - [`reducer`] - Pure transition function
//! - [`storage`] - Persisted auth token
//! - [`store`] - Shared handle that owns the current snapshot
//! - [`error`] - State error types

pub mod action;
pub mod error;
pub mod reducer;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use action::Action;
pub use error::{StateError, StateResult};
pub use reducer::reduce;
pub use snapshot::Snapshot;
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use store::Store;
