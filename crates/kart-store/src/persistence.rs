//! # Snapshot Persistence
//!
//! Durable key-value storage for the cart snapshot.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storage.json                                                           │
//! │  {                                                                      │
//! │    "cart": "{\"version\":1,\"items\":[...]}",   ◄── one key per cart   │
//! │    "other-key": "..."                           ◄── left untouched     │
//! │  }                                                                      │
//! │                                                                         │
//! │  save(): read map → replace our key → write temp file → persist        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot itself is opaque text here; encoding and decoding live in
//! `kart_core::Cart`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Stores and retrieves the serialized cart.
pub trait Persistence: Send + Sync {
    /// The stored snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> StoreResult<Option<String>>;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Storage
// =============================================================================

/// Snapshot held in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with an existing snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        MemoryStorage {
            value: Mutex::new(Some(snapshot.into())),
        }
    }

    /// Current stored value without going through the trait.
    pub fn snapshot(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> StoreResult<Option<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &str) -> StoreResult<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.to_string());
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// JSON file holding a string-to-string map; the cart lives under one key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    key: String,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        FileStorage {
            path: path.into(),
            key: key.into(),
        }
    }

    fn read_map(&self) -> StoreResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupted(format!("{}: {}", self.path.display(), e)))
    }

    /// Writes through a uniquely named temp file in the same directory, then
    /// renames it over the target.
    fn write_map(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let encoded = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        Ok(())
    }
}

impl Persistence for FileStorage {
    fn load(&self) -> StoreResult<Option<String>> {
        let mut map = self.read_map()?;
        Ok(map.remove(&self.key))
    }

    fn save(&self, snapshot: &str) -> StoreResult<()> {
        // A corrupted file is replaced rather than blocking every future save.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StoreError::Corrupted(reason)) => {
                debug!(%reason, "Discarding unreadable storage file");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };

        map.insert(self.key.clone(), snapshot.to_string());
        self.write_map(&map)?;

        debug!(path = %self.path.display(), key = %self.key, "Snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        storage.save("{\"version\":1,\"items\":[]}").unwrap();
        assert_eq!(
            storage.load().unwrap().as_deref(),
            Some("{\"version\":1,\"items\":[]}")
        );
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"), "cart");

        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("storage.json");
        let storage = FileStorage::new(&path, "cart");

        storage.save("snapshot").unwrap();

        assert!(path.exists());
        assert_eq!(storage.load().unwrap().as_deref(), Some("snapshot"));
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let storage = FileStorage::new(&path, "cart");
        storage.save("snapshot").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(map.get("cart").map(String::as_str), Some("snapshot"));
    }

    #[test]
    fn test_file_storage_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let a = FileStorage::new(&path, "cart-a");
        let b = FileStorage::new(&path, "cart-b");
        a.save("a").unwrap();
        b.save("b").unwrap();

        assert_eq!(a.load().unwrap().as_deref(), Some("a"));
        assert_eq!(b.load().unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_file_storage_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = FileStorage::new(&path, "cart");
        assert!(matches!(storage.load(), Err(StoreError::Corrupted(_))));

        // Saving recovers the file
        storage.save("snapshot").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("snapshot"));
    }

    #[test]
    fn test_file_storage_save_leaves_neighbours_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let neighbour = dir.path().join("storage.tmp");
        fs::write(&neighbour, "keep me").unwrap();

        let storage = FileStorage::new(&path, "cart");
        storage.save("one").unwrap();
        storage.save("two").unwrap();

        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "keep me");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
        assert_eq!(storage.load().unwrap().as_deref(), Some("two"));
    }
}
