//! Persistence for the dashboard layout.
//!
//! The layout is stored as one named string blob in a key-value store. The
//! [`KeyValueStore`] trait is the seam to whatever backs it: an in-memory
//! map for tests and embedding, or a directory of files on disk.
//! [`LayoutStore`] sits on top and never lets a storage failure escape.

mod file;
mod layout_store;

pub use file::FileStorage;
pub use layout_store::{LayoutStore, LAYOUT_STORAGE_KEY};

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading a key failed.
    #[error("Failed to read storage key '{key}' at {path}")]
    ReadError {
        /// Key being read.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a key failed.
    #[error("Failed to write storage key '{key}' at {path}")]
    WriteError {
        /// Key being written.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Removing a key failed.
    #[error("Failed to remove storage key '{key}' at {path}")]
    RemoveError {
        /// Key being removed.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("Invalid storage key '{key}'")]
    InvalidKey {
        /// Offending key.
        key: String,
    },

    /// The backend is not available in this context.
    #[error("Storage unavailable: {reason}")]
    Unavailable {
        /// Why the backend cannot be used.
        reason: String,
    },
}

/// A key-value string store.
///
/// Implementations may fail on any call; callers decide how much a failure
/// matters.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory key-value store.
///
/// [`MemoryStorage::unavailable`] builds a store that fails every call,
/// standing in for contexts where no storage can be used.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects every operation.
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable {
                reason: "memory storage disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").expect("get"), None);
        storage.set("k", "v1").expect("set");
        storage.set("k", "v2").expect("set");
        assert_eq!(storage.get("k").expect("get"), Some("v2".to_string()));
        assert_eq!(storage.len(), 1);
        storage.remove("k").expect("remove");
        assert!(storage.is_empty());
    }

    #[test]
    fn memory_storage_remove_missing_key_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove("missing").is_ok());
    }

    #[test]
    fn unavailable_storage_fails_every_call() {
        let mut storage = MemoryStorage::unavailable();
        assert!(matches!(
            storage.get("k"),
            Err(StorageError::Unavailable { .. })
        ));
        assert!(storage.set("k", "v").is_err());
        assert!(storage.remove("k").is_err());
    }

    #[test]
    fn display_unavailable_error() {
        let err = StorageError::Unavailable {
            reason: "sandboxed".to_string(),
        };
        assert_eq!(err.to_string(), "Storage unavailable: sandboxed");
    }

    #[test]
    fn display_write_error_includes_key_and_path() {
        let err = StorageError::WriteError {
            key: "dashboard-layout".to_string(),
            path: PathBuf::from("/data/dashboard-layout.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("dashboard-layout"));
        assert!(msg.contains("/data/dashboard-layout.json"));
    }
}
