//! Fault injection wrapper
//!
//! Faults are armed per operation with a countdown. Each call to an armed
//! operation consumes one unit; once the countdown reaches zero the
//! operation passes through to the wrapped store again.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use ticketmaster_core::DocumentId;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::traits::DocumentStore;

/// Gateway operation a fault can be armed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `insert`
    Insert,
    /// `find_by_id`
    FindById,
    /// `find`
    Find,
    /// `update_by_id`
    UpdateById,
    /// `append_to_array`
    AppendToArray,
    /// `delete_by_id`
    DeleteById,
}

/// Failure mode to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fail without touching the wrapped store
    Unavailable,
    /// Report the write as not acknowledged without touching the wrapped
    /// store (`Ok(false)` for updates; an error for inserts, which have no
    /// unacknowledged success value)
    Unacknowledged,
    /// Apply the call to the wrapped store, then report failure
    LostAcknowledgement,
}

/// Store wrapper that injects armed faults
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    armed: Mutex<FxHashMap<Operation, (Fault, usize)>>,
}

impl<S: DocumentStore> FaultyStore<S> {
    /// Wrap a store with no faults armed
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            armed: Mutex::new(FxHashMap::default()),
        }
    }

    /// Arm `fault` for the next `times` calls of `operation`
    pub fn fail_next(&self, operation: Operation, fault: Fault, times: usize) {
        let mut armed = self.armed.lock();
        if times == 0 {
            armed.remove(&operation);
        } else {
            armed.insert(operation, (fault, times));
        }
    }

    /// Disarm every fault
    pub fn clear(&self) {
        self.armed.lock().clear();
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn take(&self, operation: Operation) -> Option<Fault> {
        let mut armed = self.armed.lock();
        let (fault, remaining) = armed.get_mut(&operation)?;
        let fault = *fault;
        *remaining -= 1;
        if *remaining == 0 {
            armed.remove(&operation);
        }
        Some(fault)
    }
}

fn injected(operation: Operation) -> StoreError {
    StoreError::unavailable(format!("injected fault on {:?}", operation))
}

impl<S: DocumentStore> DocumentStore for FaultyStore<S> {
    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        match self.take(Operation::Insert) {
            None => self.inner.insert(collection, document),
            Some(Fault::Unavailable) => Err(injected(Operation::Insert)),
            Some(Fault::Unacknowledged) => Err(StoreError::unavailable("insert not acknowledged")),
            Some(Fault::LostAcknowledgement) => {
                self.inner.insert(collection, document)?;
                Err(injected(Operation::Insert))
            }
        }
    }

    fn find_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        match self.take(Operation::FindById) {
            None => self.inner.find_by_id(collection, id),
            Some(_) => Err(injected(Operation::FindById)),
        }
    }

    fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<(DocumentId, Document)>> {
        match self.take(Operation::Find) {
            None => self.inner.find(collection, filter),
            Some(_) => Err(injected(Operation::Find)),
        }
    }

    fn update_by_id(&self, collection: &str, id: &DocumentId, fields: Document) -> StoreResult<bool> {
        match self.take(Operation::UpdateById) {
            None => self.inner.update_by_id(collection, id, fields),
            Some(Fault::Unavailable) => Err(injected(Operation::UpdateById)),
            Some(Fault::Unacknowledged) => Ok(false),
            Some(Fault::LostAcknowledgement) => {
                self.inner.update_by_id(collection, id, fields)?;
                Err(injected(Operation::UpdateById))
            }
        }
    }

    fn append_to_array(
        &self,
        collection: &str,
        id: &DocumentId,
        field: &str,
        value: Value,
    ) -> StoreResult<bool> {
        match self.take(Operation::AppendToArray) {
            None => self.inner.append_to_array(collection, id, field, value),
            Some(Fault::Unavailable) => Err(injected(Operation::AppendToArray)),
            Some(Fault::Unacknowledged) => Ok(false),
            Some(Fault::LostAcknowledgement) => {
                self.inner.append_to_array(collection, id, field, value)?;
                Err(injected(Operation::AppendToArray))
            }
        }
    }

    fn delete_by_id(&self, collection: &str, id: &DocumentId) -> StoreResult<bool> {
        match self.take(Operation::DeleteById) {
            None => self.inner.delete_by_id(collection, id),
            Some(Fault::Unavailable) => Err(injected(Operation::DeleteById)),
            Some(Fault::Unacknowledged) => Ok(false),
            Some(Fault::LostAcknowledgement) => {
                self.inner.delete_by_id(collection, id)?;
                Err(injected(Operation::DeleteById))
            }
        }
    }
}
