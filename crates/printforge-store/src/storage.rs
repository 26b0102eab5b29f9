//! Storage backends keyed by collection name.
//!
//! The queue and board logic only ever see the [`Storage`] trait, so tests
//! can run against [`MemoryStorage`] without touching the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::atomic::atomic_write;
use crate::error::{Result, StoreError};

/// Key-value storage of JSON payloads, one payload per collection.
pub trait Storage {
    /// Returns the raw payload of a collection, or `None` when the
    /// collection has never been written.
    fn read(&self, collection: &str) -> Result<Option<String>>;

    /// Replaces the payload of a collection.
    fn write(&self, collection: &str, payload: &str) -> Result<()>;

    /// Deletes a collection. Deleting a missing collection is a no-op.
    fn remove(&self, collection: &str) -> Result<()>;
}

/// File-backed storage: one `<collection>.json` per collection under a
/// base directory, written atomically.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", collection))
    }
}

impl Storage for FileStorage {
    fn read(&self, collection: &str) -> Result<Option<String>> {
        let path = self.collection_path(collection);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn write(&self, collection: &str, payload: &str) -> Result<()> {
        atomic_write(&self.collection_path(collection), payload.as_bytes())
    }

    fn remove(&self, collection: &str) -> Result<()> {
        let path = self.collection_path(collection);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    collections: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, collection: &str) -> Result<Option<String>> {
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections.get(collection).cloned())
    }

    fn write(&self, collection: &str, payload: &str) -> Result<()> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections.insert(collection.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, collection: &str) -> Result<()> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections.remove(collection);
        Ok(())
    }
}

/// Loads a collection as a typed vector; a missing collection is empty.
pub(crate) fn load_vec<S: Storage, T: DeserializeOwned>(
    storage: &S,
    collection: &str,
) -> Result<Vec<T>> {
    match storage.read(collection)? {
        Some(payload) => {
            serde_json::from_str(&payload).map_err(|source| StoreError::Malformed {
                collection: collection.to_string(),
                source,
            })
        }
        None => Ok(Vec::new()),
    }
}

/// Serializes and writes a full collection.
pub(crate) fn store_vec<S: Storage, T: Serialize>(
    storage: &S,
    collection: &str,
    items: &[T],
) -> Result<()> {
    let payload = serde_json::to_string_pretty(items)?;
    storage.write(collection, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_collection() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.read("quotes").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_read() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.write("quotes", "[1,2,3]").unwrap();

        assert_eq!(storage.read("quotes").unwrap().unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_file_storage_remove() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.write("quotes", "[]").unwrap();
        storage.remove("quotes").unwrap();
        storage.remove("quotes").unwrap(); // missing is a no-op

        assert!(storage.read("quotes").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();

        storage.write("jobs", "[]").unwrap();
        assert_eq!(storage.read("jobs").unwrap().unwrap(), "[]");

        storage.remove("jobs").unwrap();
        assert!(storage.read("jobs").unwrap().is_none());
    }

    #[test]
    fn test_load_vec_missing_is_empty() {
        let storage = MemoryStorage::new();
        let items: Vec<u32> = load_vec(&storage, "numbers").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_load_vec_malformed() {
        let storage = MemoryStorage::new();
        storage.write("numbers", "{not json").unwrap();

        let result: Result<Vec<u32>> = load_vec(&storage, "numbers");
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_store_vec_roundtrip() {
        let storage = MemoryStorage::new();
        store_vec(&storage, "numbers", &[1u32, 2, 3]).unwrap();

        let items: Vec<u32> = load_vec(&storage, "numbers").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
