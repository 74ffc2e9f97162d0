//! String key-value storage backing the board.
//!
//! The board lives in a single named slot. `FileStore` keeps every slot in one
//! JSON object on disk, written atomically; `MemoryStore` keeps them in a map.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{KanbanError, Result};

/// A synchronous string-keyed store with whole-value reads and writes.
pub trait KeyValueStore {
    /// Value held in `key`, or `None` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value held in `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, mainly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one slot.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-object file store: `{"slot": "value", ...}`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every slot. A missing file is an empty store; a corrupt one is
    /// logged and treated as empty so the next write replaces it.
    fn read_slots(&self) -> Result<BTreeMap<String, String>> {
        let buf = match fs::read_to_string(&self.path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(KanbanError::io(&self.path, e)),
        };
        if buf.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&buf) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "store file is corrupt, ignoring its contents");
                Ok(BTreeMap::new())
            }
        }
    }

    /// Atomic-ish write via temp + rename.
    fn write_slots(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| KanbanError::io(parent, e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(slots)?;
        let mut f = File::create(&tmp).map_err(|e| KanbanError::io(&tmp, e))?;
        f.write_all(data.as_bytes())
            .and_then(|_| f.flush())
            .map_err(|e| KanbanError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| KanbanError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = data.len(), "store written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut slots = match self.read_slots() {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!(error = %e, "could not read existing store, rewriting it");
                BTreeMap::new()
            }
        };
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_keeps_other_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut store = FileStore::new(&path);
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_reads_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
