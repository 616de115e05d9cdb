//! Durable storage adapters for the cart.
//!
//! The cart store writes its whole payload through a [`CartStorage`] trait
//! object, so tests run against [`MemoryStorage`] and production against
//! [`JsonFileStorage`] without the store knowing the difference.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Errors from a storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed (missing directory, quota, permissions).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Adapter state was poisoned or otherwise unusable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage for serialized cart payloads.
///
/// Writes are fire-and-forget from the caller's perspective: the cart store
/// logs failures and keeps operating in memory rather than propagating them.
pub trait CartStorage: Send + Sync {
    /// Load the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the record exists but cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Persist `payload` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the write fails.
    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        (**self).save(key, payload)
    }
}

/// File-backed storage: one JSON file per key under a base directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a file storage rooted at `dir`. The directory is created on
    /// first write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), payload)?;
        Ok(())
    }
}

/// In-memory storage for tests and persistence-free sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
