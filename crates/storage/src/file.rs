//! File-backed document store
//!
//! A [`MemoryStore`] whose collections are mirrored to disk as one JSON
//! snapshot per collection (`<data_dir>/<collection>.json`).
//!
//! ## Write path
//!
//! 1. Apply the write to the in-memory store.
//! 2. Under the collection's persist lock, snapshot the touched collection
//!    and write it to `<collection>.json.tmp`, then rename over
//!    `<collection>.json`.
//!
//! Each collection has its own persist lock, so `metrics` writes never wait
//! on a `sprints` snapshot. A persist rewrites the whole collection: write
//! cost grows linearly with collection size. The snapshot is taken under the
//! lock, so the last persist always reflects every write acknowledged before
//! it. If step 2 fails the write is still
//! visible in memory and the caller receives `StoreError::Unavailable`; it
//! must not assume either outcome.
//!
//! ## Recovery
//!
//! `open` loads every `*.json` snapshot in the data directory. Leftover
//! `.tmp` files from an interrupted persist are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use ticketmaster_core::DocumentId;
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::memory::MemoryStore;
use crate::traits::DocumentStore;

const SNAPSHOT_EXTENSION: &str = "json";

/// Document store persisted as per-collection JSON snapshots
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    memory: MemoryStore,
    persist_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FileStore {
    /// Open (or create) a store rooted at `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a snapshot
    /// cannot be read or decoded.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;

        let memory = MemoryStore::new();
        for entry in fs::read_dir(&data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(target: "ticketmaster::store", path = ?path, "Skipping snapshot with non UTF-8 name");
                continue;
            };
            let documents = read_snapshot(&path)?;
            info!(
                target: "ticketmaster::store",
                collection,
                documents = documents.len(),
                "Loaded collection snapshot"
            );
            memory.load(collection, documents);
        }

        Ok(Self {
            data_dir,
            memory,
            persist_locks: DashMap::new(),
        })
    }

    /// Directory holding the snapshots
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The in-memory view
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    fn snapshot_path(&self, collection: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", collection, SNAPSHOT_EXTENSION))
    }

    fn persist_lock(&self, collection: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.persist_locks
                .entry(collection.to_string())
                .or_default()
                .value(),
        )
    }

    fn persist(&self, collection: &str) -> StoreResult<()> {
        let lock = self.persist_lock(collection);
        let _guard = lock.lock();
        let documents: BTreeMap<String, Value> = self
            .memory
            .snapshot(collection)
            .into_iter()
            .map(|(id, doc)| (id.to_string(), Value::Object(doc)))
            .collect();
        let bytes = serde_json::to_vec(&documents)?;

        let path = self.snapshot_path(collection);
        let tmp = path.with_extension(format!("{}.tmp", SNAPSHOT_EXTENSION));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn validate_collection(collection: &str) -> StoreResult<()> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::unavailable(format!(
            "invalid collection name '{}'",
            collection
        )))
    }
}

fn read_snapshot(path: &Path) -> StoreResult<Vec<(DocumentId, Document)>> {
    let bytes = fs::read(path)?;
    let documents: BTreeMap<String, Document> = serde_json::from_slice(&bytes).map_err(|e| {
        StoreError::Serialization(format!("corrupt snapshot '{}': {}", path.display(), e))
    })?;
    Ok(documents
        .into_iter()
        .map(|(id, doc)| (DocumentId::from(id), doc))
        .collect())
}

impl DocumentStore for FileStore {
    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        validate_collection(collection)?;
        let id = self.memory.insert(collection, document)?;
        self.persist(collection)?;
        Ok(id)
    }

    fn find_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        self.memory.find_by_id(collection, id)
    }

    fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<(DocumentId, Document)>> {
        self.memory.find(collection, filter)
    }

    fn update_by_id(&self, collection: &str, id: &DocumentId, fields: Document) -> StoreResult<bool> {
        let acked = self.memory.update_by_id(collection, id, fields)?;
        if acked {
            self.persist(collection)?;
        }
        Ok(acked)
    }

    fn append_to_array(
        &self,
        collection: &str,
        id: &DocumentId,
        field: &str,
        value: Value,
    ) -> StoreResult<bool> {
        let acked = self.memory.append_to_array(collection, id, field, value)?;
        if acked {
            self.persist(collection)?;
        }
        Ok(acked)
    }

    fn delete_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        let acked = self.memory.delete_by_id(collection, id)?;
        if acked {
            self.persist(collection)?;
        }
        Ok(acked)
    }
}
