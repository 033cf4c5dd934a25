//! Document store gateway trait
//!
//! This module defines the DocumentStore trait that lets the engine swap
//! in-memory, file-backed or remote stores without changing upper layers.

use serde_json::Value;
use ticketmaster_core::DocumentId;

use crate::document::Document;
use crate::error::StoreResult;
use crate::filter::Filter;

/// Narrow interface over keyed document collections
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Every call is a potential
/// suspension point and may fail independently of concurrent calls.
///
/// # Ordering
///
/// `find` returns documents in store-defined order. Callers needing a
/// particular order must sort themselves.
pub trait DocumentStore: Send + Sync {
    /// Insert a document, returning the id the store generated for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store did not acknowledge the insert. The
    /// caller must not assume the document was persisted.
    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId>;

    /// Fetch a document by id.
    ///
    /// Returns `None` if the id does not resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn find_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>>;

    /// Fetch every document matching `filter`, with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<(DocumentId, Document)>>;

    /// Merge `fields` into a document, leaving unlisted fields untouched.
    ///
    /// Returns `false` if the update was not acknowledged (id does not resolve).
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn update_by_id(&self, collection: &str, id: &DocumentId, fields: Document) -> StoreResult<bool>;

    /// Append `value` to the end of the array stored under `field`.
    ///
    /// Creates the field as a one-element array when absent. Each call is
    /// atomic: concurrent appends to the same document all land.
    ///
    /// Returns `false` if the update was not acknowledged (id does not resolve).
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails, or if `field` holds
    /// something other than an array.
    fn append_to_array(
        &self,
        collection: &str,
        id: &DocumentId,
        field: &str,
        value: Value,
    ) -> StoreResult<bool>;

    /// Remove a document.
    ///
    /// Returns `false` if the id does not resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn delete_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<bool>;
}
