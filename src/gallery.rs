//! Gallery manager - owns the in-memory image collection.
//!
//! Sole reader and writer of the persistent store. Every mutation rewrites
//! the full collection, so `add_many`/`remove` cost O(n) in the number of
//! stored records. Acceptable at gallery scale; the store contract has no
//! partial-write mode.

use crate::store::{GalleryStore, ImageRecord};
use crate::utils::encode_data_uri;
use rand::Rng;
use tracing::{debug, info};

/// A file picked or dropped by the user, already filtered to image media
/// types by the ingestion layer. The manager does not re-validate.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub struct GalleryManager {
    store: Box<dyn GalleryStore>,
    records: Vec<ImageRecord>,
}

impl GalleryManager {
    /// Loads the collection from the store. A missing or corrupt slot
    /// yields an empty gallery, never an error.
    pub fn new(store: Box<dyn GalleryStore>) -> Self {
        let records = store.load();
        info!(count = records.len(), "Gallery manager initialized");
        Self { store, records }
    }

    /// All records, newest first.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encodes each upload into a record under `category` and prepends the
    /// batch in input order, then persists once. Returns the new records.
    pub fn add_many(&mut self, category: &str, uploads: Vec<UploadFile>) -> Vec<ImageRecord> {
        if uploads.is_empty() {
            return Vec::new();
        }

        let now = chrono::Utc::now().timestamp_millis();
        let added: Vec<ImageRecord> = uploads
            .into_iter()
            .map(|file| ImageRecord {
                id: fresh_id(now),
                src: encode_data_uri(&file.mime, &file.bytes),
                name: file.name,
                size: file.bytes.len() as u64,
                category: category.to_string(),
                created_at: now,
            })
            .collect();

        debug!(count = added.len(), category, "Adding records");
        self.records.splice(0..0, added.iter().cloned());
        self.store.save(&self.records);
        added
    }

    /// Removes the record with the given id and persists. Absent ids are a
    /// no-op, not an error.
    pub fn remove(&mut self, id: &str) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() != before {
            debug!(id, "Record removed");
            self.store.save(&self.records);
        }
    }

    /// Records whose category equals `category`, in store order. Pure
    /// filter; unknown or stale category strings are matched literally.
    pub fn filter_by_category(&self, category: &str) -> Vec<ImageRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }
}

/// Timestamp plus a random alphanumeric suffix. Unique within a store as
/// long as the suffix space isn't exhausted inside one millisecond.
fn fresh_id(now_ms: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{now_ms}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    fn upload(name: &str) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3, 4],
        }
    }

    fn manager() -> (GalleryManager, MemoryStore) {
        let store = MemoryStore::new();
        (GalleryManager::new(Box::new(store.clone())), store)
    }

    #[test]
    fn add_many_prepends_in_input_order() {
        let (mut mgr, _) = manager();
        mgr.add_many("REALITY", vec![upload("first.png")]);
        mgr.add_many("REALITY", vec![upload("a.png"), upload("b.png")]);

        let names: Vec<&str> = mgr.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png", "first.png"]);
    }

    #[test]
    fn add_many_assigns_unique_ids_and_category() {
        let (mut mgr, _) = manager();
        let added = mgr.add_many("REALITY", vec![upload("a.png"), upload("b.png")]);

        assert!(added.iter().all(|r| r.category == "REALITY"));
        let ids: HashSet<&str> = mgr.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), mgr.len());
    }

    #[test]
    fn add_many_encodes_payload_and_size() {
        let (mut mgr, _) = manager();
        mgr.add_many("ZION", vec![upload("a.png")]);

        let record = &mgr.records()[0];
        assert_eq!(record.src, "data:image/png;base64,AQIDBA==");
        assert_eq!(record.size, 4);
    }

    #[test]
    fn add_many_persists_to_store() {
        let (mut mgr, store) = manager();
        mgr.add_many("REALITY", vec![upload("a.png")]);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn remove_absent_id_is_a_noop() {
        let (mut mgr, _) = manager();
        mgr.add_many("REALITY", vec![upload("a.png")]);
        mgr.remove("no-such-id");
        assert_eq!(mgr.len(), 1);
    }

    #[test]
    fn remove_deletes_and_persists() {
        let (mut mgr, store) = manager();
        mgr.add_many("REALITY", vec![upload("a.png"), upload("b.png")]);
        let id = mgr.records()[0].id.clone();

        mgr.remove(&id);
        assert_eq!(mgr.len(), 1);
        assert!(mgr.records().iter().all(|r| r.id != id));
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn filter_matches_category_only_in_store_order() {
        let (mut mgr, _) = manager();
        mgr.add_many("REALITY", vec![upload("r1.png")]);
        mgr.add_many("ZION", vec![upload("z1.png")]);
        mgr.add_many("REALITY", vec![upload("r2.png")]);

        let reality = mgr.filter_by_category("REALITY");
        let names: Vec<&str> = reality.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["r2.png", "r1.png"]);
        assert!(mgr.filter_by_category("MISSIONS").is_empty());
    }

    #[test]
    fn filter_preserves_stale_categories() {
        let (mut mgr, store) = manager();
        mgr.add_many("NEBUCHADNEZZAR", vec![upload("old.png")]);

        // A category no longer in the configured set stays filterable.
        assert_eq!(mgr.filter_by_category("NEBUCHADNEZZAR").len(), 1);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn switching_category_filters_to_empty() {
        let (mut mgr, _) = manager();
        mgr.add_many("REALITY", vec![upload("a.png"), upload("b.png")]);

        assert_eq!(mgr.filter_by_category("REALITY").len(), 2);
        assert!(mgr.filter_by_category("ZION").is_empty());
    }

    #[test]
    fn new_reloads_persisted_collection() {
        let store = MemoryStore::new();
        let mut mgr = GalleryManager::new(Box::new(store.clone()));
        mgr.add_many("REALITY", vec![upload("a.png")]);

        let reloaded = GalleryManager::new(Box::new(store));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].name, "a.png");
    }
}
