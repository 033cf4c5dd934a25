//! In-memory document store
//!
//! # Design
//!
//! - DashMap: one shard per collection, lock-free reads
//! - FxHashMap: O(1) lookups by document id, fast non-crypto hash
//! - Per-collection locking: writes to `sprints` never contend with `metrics`
//!
//! # Atomicity
//!
//! Every write holds its collection's shard lock for the whole
//! read-modify-write, so `append_to_array` and `update_by_id` are atomic per
//! call. Nothing spans more than one document.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rustc_hash::FxHashMap;
use serde_json::Value;
use ticketmaster_core::DocumentId;
use tracing::debug;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::traits::DocumentStore;

/// Documents of one collection, keyed by id
#[derive(Debug, Default)]
pub struct Collection {
    pub(crate) data: FxHashMap<DocumentId, Document>,
}

impl Collection {
    /// Number of documents
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sharded in-memory store - DashMap by collection, HashMap within
///
/// # Example
///
/// ```ignore
/// use ticketmaster_storage::{DocumentStore, Filter, MemoryStore};
///
/// let store = MemoryStore::new();
/// let id = store.insert("sprints", doc)?;
/// let all = store.find("sprints", &Filter::all())?;
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Collection>,
    /// Acknowledged writes so far
    writes: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection (0 if it does not exist)
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |c| c.value().len())
    }

    /// Names of collections that have been written to
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of acknowledged writes since creation
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::AcqRel);
    }

    /// Copy every document of a collection
    pub(crate) fn snapshot(&self, collection: &str) -> Vec<(DocumentId, Document)> {
        self.collections
            .get(collection)
            .map(|c| {
                c.data
                    .iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace a collection wholesale (used when loading snapshots)
    pub(crate) fn load(&self, collection: &str, documents: Vec<(DocumentId, Document)>) {
        let data: FxHashMap<DocumentId, Document> = documents.into_iter().collect();
        self.collections
            .insert(collection.to_string(), Collection { data });
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        let mut shard = self.collections.entry(collection.to_string()).or_default();
        let mut id = DocumentId::generate();
        while shard.data.contains_key(&id) {
            id = DocumentId::generate();
        }
        shard.data.insert(id.clone(), document);
        drop(shard);

        self.record_write();
        debug!(target: "ticketmaster::store", collection, id = %id, "Inserted document");
        Ok(id)
    }

    fn find_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.data.get(id).cloned()))
    }

    fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<(DocumentId, Document)>> {
        let Some(shard) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(shard
            .data
            .iter()
            .filter(|(_, doc)| filter.matches(doc))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect())
    }

    fn update_by_id(&self, collection: &str, id: &DocumentId, fields: Document) -> StoreResult<bool> {
        let Some(mut shard) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(document) = shard.data.get_mut(id) else {
            return Ok(false);
        };
        for (field, value) in fields {
            document.insert(field, value);
        }
        drop(shard);

        self.record_write();
        debug!(target: "ticketmaster::store", collection, id = %id, "Updated document");
        Ok(true)
    }

    fn append_to_array(
        &self,
        collection: &str,
        id: &DocumentId,
        field: &str,
        value: Value,
    ) -> StoreResult<bool> {
        let Some(mut shard) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(document) = shard.data.get_mut(id) else {
            return Ok(false);
        };
        match document
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => items.push(value),
            other => {
                return Err(StoreError::Serialization(format!(
                    "cannot append to field '{}': expected array, found {}",
                    field, other
                )))
            }
        }
        drop(shard);

        self.record_write();
        debug!(target: "ticketmaster::store", collection, id = %id, field, "Appended to array");
        Ok(true)
    }

    fn delete_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        let Some(mut shard) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        if shard.data.remove(id).is_none() {
            return Ok(false);
        }
        drop(shard);

        self.record_write();
        debug!(target: "ticketmaster::store", collection, id = %id, "Deleted document");
        Ok(true)
    }
}
