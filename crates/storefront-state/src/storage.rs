//! # Persisted Token Storage
//!
//! The auth token survives restarts; nothing else does.
//!
//! ## Storage File
//! ```text
//! ~/.local/share/storefront/local_storage.json          (Linux)
//! ~/Library/Application Support/com.storefront.client/  (macOS)
//!
//! { "token": "eyJhbGciOi..." }
//! ```
//!
//! The file is a flat JSON key-value document. Keys other than [`TOKEN_KEY`]
//! are preserved on write, so the file can be shared with other settings.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{StateError, StateResult};

/// Key under which the auth token is stored.
pub const TOKEN_KEY: &str = "token";

/// File name of the key-value document in the data directory.
pub const STORAGE_FILE: &str = "local_storage.json";

/// Persistence for the auth token.
///
/// Calls are synchronous: the store invokes them while applying an action,
/// and actions never wait on I/O from the async runtime.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn load(&self) -> StateResult<Option<String>>;

    /// Stores `token`, replacing any previous value.
    fn save(&self, token: &str) -> StateResult<()>;

    /// Removes the stored token. Removing a missing token is not an error.
    fn clear(&self) -> StateResult<()>;
}

// =============================================================================
// File-backed storage
// =============================================================================

/// Token storage in a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    /// Opens the storage file in the platform data directory.
    pub fn open_default() -> StateResult<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| StateError::Storage("no home directory for local storage".into()))
    }

    /// Default location of the storage file.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "client")
            .map(|dirs| dirs.data_dir().join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StateResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> StateResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> StateResult<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> StateResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)?;
        debug!(path = ?self.path, "Token stored");
        Ok(())
    }

    fn clear(&self) -> StateResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
            debug!(path = ?self.path, "Token removed");
        }
        Ok(())
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Token storage that lives as long as the process. Used by tests and
/// throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        MemoryTokenStore {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> StateResult<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> StateResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> StateResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
