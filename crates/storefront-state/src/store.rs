//! # Store
//!
//! Shared handle that owns the current snapshot.
//!
//! ## Thread Safety
//! The snapshot sits inside a `tokio::sync::watch` channel. `dispatch` holds
//! a dispatch lock across the reducer and the token write, so concurrent
//! dispatches are serialized and storage sees the same order as the
//! snapshot. The last one wins. Neither lock is held across an `.await`;
//! dispatch is synchronous.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Store (Clone)                                 │
//! │                                                                         │
//! │   Arc<watch::Sender<Snapshot>> ───────► watch::Receiver (subscribe)     │
//! │   Arc<dyn TokenStore>          ───────► local_storage.json / memory     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::action::Action;
use crate::error::StateResult;
use crate::reducer::reduce;
use crate::snapshot::Snapshot;
use crate::storage::{MemoryTokenStore, TokenStore};

/// The state container.
#[derive(Clone)]
pub struct Store {
    tx: Arc<watch::Sender<Snapshot>>,
    storage: Arc<dyn TokenStore>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("snapshot", &*self.tx.borrow())
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Creates the store, seeding the token from `storage`.
    ///
    /// An unreadable storage file starts the session logged out rather than
    /// failing start-up.
    pub fn open(storage: Arc<dyn TokenStore>) -> Self {
        let token = storage.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read stored token, starting logged out");
            None
        });
        debug!(authenticated = token.is_some(), "State container opened");

        let (tx, _rx) = watch::channel(Snapshot::initial(token));
        Store {
            tx: Arc::new(tx),
            storage,
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store backed by in-memory token storage.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryTokenStore::new()))
    }

    /// Returns an owned copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Runs `f` against the current snapshot without copying it.
    ///
    /// Keep `f` short: dispatches wait while it runs.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// The current auth token.
    pub fn token(&self) -> Option<String> {
        self.with_snapshot(|s| s.token.clone())
    }

    /// A receiver that observes every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Applies `action` and publishes the resulting snapshot.
    ///
    /// `SetToken` and `Logout` also update persisted storage. A storage
    /// failure is logged; the in-memory transition still happens.
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "Dispatching action");

        // Storage writes must land in snapshot order
        let _guard = self
            .dispatch_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.tx.send_modify(|current| {
            *current = reduce(current, &action);
        });

        if action.touches_storage() {
            self.persist(&action);
        }
    }

    /// Decodes a serialized `{"type", "payload"}` action and dispatches it.
    ///
    /// An unknown tag is rejected and the snapshot is left as it was.
    pub fn dispatch_tagged(&self, value: serde_json::Value) -> StateResult<()> {
        let action = Action::from_tagged(value)?;
        self.dispatch(action);
        Ok(())
    }

    fn persist(&self, action: &Action) {
        let result = match action {
            Action::SetToken(Some(token)) => self.storage.save(token),
            Action::SetToken(None) | Action::Logout => self.storage.clear(),
            _ => Ok(()),
        };

        if let Err(e) = result {
            warn!(action = action.name(), error = %e, "Failed to persist token");
        }
    }
}
