//! Load/save of the persisted layout blob.
//!
//! Persistence is best-effort. `load` treats every failure as "nothing
//! stored", and `save`/`clear` log failures and carry on, so a broken
//! backend can never stall or crash a session.

use crate::layout::Layout;
use crate::storage::KeyValueStore;

/// Key under which the dashboard layout is stored.
pub const LAYOUT_STORAGE_KEY: &str = "dashboard-layout";

/// Reads and writes the serialized layout under a single key.
///
/// The store only handles the serialized form; it never holds or mutates
/// the live layout.
#[derive(Debug, Clone)]
pub struct LayoutStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> LayoutStore<S> {
    /// Creates a store using [`LAYOUT_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, LAYOUT_STORAGE_KEY)
    }

    /// Creates a store using a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the persisted blob, or `None` if absent or unreadable.
    pub fn load(&self) -> Option<String> {
        match self.storage.get(&self.key) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("Failed to load layout, treating as absent: {e}");
                None
            }
        }
    }

    /// Serializes `layout` and overwrites the stored blob.
    pub fn save(&mut self, layout: &Layout) {
        let json = match layout.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize layout, not saved: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &json) {
            tracing::warn!("Failed to save layout: {e}");
        }
    }

    /// Removes the stored blob.
    pub fn clear(&mut self) {
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::warn!("Failed to clear saved layout: {e}");
        }
    }

    /// The underlying key-value store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the key-value backend.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
