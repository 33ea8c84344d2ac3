//! Directory-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temp file
//! first and are renamed into place, so readers never see a half-written
//! value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::xdg;
use crate::storage::{KeyValueStore, StorageError};

/// Key-value store keeping one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadError {
                key: key.to_string(),
                path,
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_error = |path: &Path, source| StorageError::WriteError {
            key: key.to_string(),
            path: path.to_path_buf(),
            source,
        };

        if !self.dir.is_dir() {
            xdg::ensure_dir(&self.dir).map_err(|e| write_error(&self.dir, e))?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| write_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            write_error(&path, e)
        })?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::RemoveError {
                key: key.to_string(),
                path,
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_returns_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("dashboard-layout").expect("get"), None);
    }

    #[test]
    fn set_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().join("nested").join("store");
        let mut storage = FileStorage::new(&root);
        storage.set("dashboard-layout", "{\"lg\":[]}").expect("set");
        assert!(root.join("dashboard-layout.json").exists());
        assert!(!root.join("dashboard-layout.json.tmp").exists());
        assert_eq!(
            storage.get("dashboard-layout").expect("get"),
            Some("{\"lg\":[]}".to_string())
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut storage = FileStorage::new(dir.path());
        storage.set("k", "first").expect("set");
        storage.set("k", "second").expect("set");
        assert_eq!(storage.get("k").expect("get"), Some("second".to_string()));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut storage = FileStorage::new(dir.path());
        storage.set("k", "v").expect("set");
        storage.remove("k").expect("remove");
        storage.remove("k").expect("second remove");
        assert_eq!(storage.get("k").expect("get"), None);
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        for key in ["", "../etc/passwd", ".hidden", "a/b", "with space"] {
            assert!(
                matches!(storage.path_for(key), Err(StorageError::InvalidKey { .. })),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn get_on_directory_path_is_read_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join("k.json")).expect("create dir");
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.get("k"),
            Err(StorageError::ReadError { .. })
        ));
    }
}
