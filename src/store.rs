//! Persistent store for the gallery collection.
//!
//! The whole collection lives in a single JSON file (the "durable slot") in
//! the app data directory. Reads happen once at startup, writes on every
//! mutation. Storage faults never reach the caller: a bad read degrades to an
//! empty collection, a bad write is logged and dropped while the in-memory
//! state stays authoritative.

use crate::constants::GALLERY_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// One stored image entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique identity key, assigned at creation and never changed.
    pub id: String,
    /// Self-contained `data:<mime>;base64,...` payload.
    pub src: String,
    /// Original file name, informational only.
    pub name: String,
    /// Byte length of the original file, informational only.
    pub size: u64,
    /// Category label active when the record was uploaded.
    pub category: String,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

/// Storage backend for the gallery collection.
///
/// `load` must never fail visibly; `save` must never panic or surface errors.
pub trait GalleryStore {
    fn load(&self) -> Vec<ImageRecord>;
    fn save(&self, records: &[ImageRecord]);
}

/// JSON-file backed store (`gallery.json` in the data directory).
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(GALLERY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GalleryStore for JsonFileStore {
    fn load(&self) -> Vec<ImageRecord> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<Vec<ImageRecord>>(&raw) {
                Ok(records) => {
                    debug!(path = %self.path.display(), count = records.len(), "Gallery loaded");
                    records
                }
                Err(e) => {
                    warn!(error = %e, path = %self.path.display(), "Malformed gallery file, starting empty");
                    Vec::new()
                }
            },
            Err(_) => {
                debug!(path = %self.path.display(), "No gallery file found, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[ImageRecord]) {
        match serde_json::to_string(records) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!(error = %e, path = %self.path.display(), "Failed to save gallery");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize gallery"),
        }
    }
}

/// In-memory store, used by tests and as a fallback when no data directory
/// is writable. Cloning shares the underlying slot.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Vec<ImageRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GalleryStore for MemoryStore {
    fn load(&self) -> Vec<ImageRecord> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn save(&self, records: &[ImageRecord]) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = records.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str, category: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            src: "data:image/png;base64,aGVsbG8=".to_string(),
            name: format!("{id}.png"),
            size: 5,
            category: category.to_string(),
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_malformed_file_returns_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.path(), "{not json]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let records = vec![record("a", "REALITY"), record("b", "ZION")];

        store.save(&records);
        assert_eq!(store.load(), records);

        // Save replaces prior content wholesale.
        store.save(&records[..1]);
        assert_eq!(store.load(), records[..1]);
    }

    #[test]
    fn save_to_unwritable_path_does_not_panic() {
        let store = JsonFileStore::new(Path::new("/nonexistent/dir"));
        store.save(&[record("a", "REALITY")]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn memory_store_shares_slot_across_clones() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save(&[record("a", "REALITY")]);
        assert_eq!(other.load().len(), 1);
    }
}
