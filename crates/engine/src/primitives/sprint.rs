//! SprintManager: sprint lifecycle
//!
//! ## Design
//!
//! Sprints are stored one document per sprint in the `sprints` collection.
//! The store-generated id lives outside the document body and is attached
//! on every read.
//!
//! ## Event log
//!
//! A sprint's `events` field only ever grows. Appends go through the store's
//! append-to-array operation, which is atomic per call, so concurrent
//! appends to the same sprint all land. The sprint returned from
//! `append_event` is a fresh read taken after the write; it may already
//! include events appended concurrently by other callers.
//!
//! ## End-time clamp
//!
//! An end time at or before the start time is treated as absent, both on
//! creation and on patches. A patch is checked against the effective window:
//! its own bounds, falling back to the stored ones.

use serde_json::Value;
use ticketmaster_core::{
    now_millis, parse, resolve_end_time, DocumentId, Error, Event, Result, Sprint, SprintPatch,
    UnixMillis,
};
use ticketmaster_storage::document::{from_document_with_id, Document};
use ticketmaster_storage::Filter;
use tracing::{debug, info};

use crate::database::Database;

/// Collection holding sprint documents
pub const SPRINT_COLLECTION: &str = "sprints";

const ID_FIELD: &str = "id";
const START_TIME_FIELD: &str = "start_time";
const END_TIME_FIELD: &str = "end_time";
const EVENTS_FIELD: &str = "events";

/// Sprint lifecycle component
///
/// Stateless facade over Database; all state lives in the store.
///
/// # Example
///
/// ```ignore
/// let sprints = SprintManager::new(db);
/// let sprint = sprints.create(None, None)?;
/// let sprint = sprints.append_event(sprint.id.as_str(), &payload)?;
/// assert_eq!(sprint.event_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct SprintManager {
    db: Database,
}

impl SprintManager {
    /// Create a new SprintManager
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a sprint.
    ///
    /// `start_time` defaults to now. `end_time` is dropped when absent or
    /// not strictly after the start.
    ///
    /// # Errors
    ///
    /// `SprintNotCreated` if the store does not acknowledge the insert.
    pub fn create(
        &self,
        start_time: Option<UnixMillis>,
        end_time: Option<UnixMillis>,
    ) -> Result<Sprint> {
        self.create_at(now_millis(), start_time, end_time)
    }

    /// Create a sprint with an explicit notion of "now".
    ///
    /// # Errors
    ///
    /// `SprintNotCreated` if the store does not acknowledge the insert.
    pub fn create_at(
        &self,
        now: UnixMillis,
        start_time: Option<UnixMillis>,
        end_time: Option<UnixMillis>,
    ) -> Result<Sprint> {
        let start_time = start_time.unwrap_or(now);
        let end_time = resolve_end_time(start_time, end_time);

        let mut document = Document::new();
        document.insert(START_TIME_FIELD.to_string(), Value::from(start_time));
        if let Some(end) = end_time {
            document.insert(END_TIME_FIELD.to_string(), Value::from(end));
        }
        document.insert(EVENTS_FIELD.to_string(), Value::Array(Vec::new()));

        let id = self
            .db
            .store()
            .insert(SPRINT_COLLECTION, document)
            .map_err(|e| Error::SprintNotCreated {
                reason: e.to_string(),
            })?;

        info!(
            target: "ticketmaster::sprint",
            sprint_id = %id,
            start_time,
            end_time = ?end_time,
            "Created sprint"
        );
        Ok(Sprint {
            id,
            start_time,
            end_time,
            events: Vec::new(),
        })
    }

    /// Fetch a sprint by id.
    ///
    /// # Errors
    ///
    /// `SprintNotFound` if no sprint has this id.
    pub fn get(&self, id: &str) -> Result<Sprint> {
        let doc_id = DocumentId::from(id);
        match self.db.store().find_by_id(SPRINT_COLLECTION, &doc_id)? {
            Some(document) => decode(&doc_id, document),
            None => Err(Error::sprint_not_found(id)),
        }
    }

    /// Fetch every sprint, in store order.
    pub fn list(&self) -> Result<Vec<Sprint>> {
        self.db
            .store()
            .find(SPRINT_COLLECTION, &Filter::all())?
            .into_iter()
            .map(|(id, document)| decode(&id, document))
            .collect()
    }

    /// Validate `payload` as an [`Event`] and append it to a sprint.
    ///
    /// # Errors
    ///
    /// - `IllegalPayload` if the payload does not match the event shape
    ///   (nothing is written)
    /// - `SprintNotFound` if the append is not acknowledged
    pub fn append_event(&self, id: &str, payload: &Value) -> Result<Sprint> {
        let event: Event = parse(payload)?;
        self.append(id, &event)
    }

    /// Append an already validated event to a sprint and return the
    /// re-read sprint.
    ///
    /// # Errors
    ///
    /// `SprintNotFound` if the append is not acknowledged.
    pub fn append(&self, id: &str, event: &Event) -> Result<Sprint> {
        let value = serde_json::to_value(event)
            .map_err(|e| Error::internal(format!("event does not encode: {}", e)))?;

        let acked = self
            .db
            .store()
            .append_to_array(SPRINT_COLLECTION, &DocumentId::from(id), EVENTS_FIELD, value)?;
        if !acked {
            return Err(Error::sprint_not_found(id));
        }

        debug!(
            target: "ticketmaster::sprint",
            sprint_id = id,
            ticket_id = %event.ticket_id,
            status = %event.status,
            "Appended event"
        );
        self.get(id)
    }

    /// Validate `payload` as a [`SprintPatch`] and merge it into a sprint.
    ///
    /// # Errors
    ///
    /// - `IllegalPayload` if the payload does not match the patch shape,
    ///   including when it carries `id` or `events` (nothing is written)
    /// - `SprintNotFound` if the update is not acknowledged
    pub fn update(&self, id: &str, payload: &Value) -> Result<Sprint> {
        let patch: SprintPatch = parse(payload)?;
        self.apply_patch(id, &patch)
    }

    /// Merge an already validated patch into a sprint and return the
    /// re-read sprint.
    ///
    /// Fields the patch does not carry are left untouched. The stored window
    /// is read first so the end-time clamp also applies to patches carrying
    /// a single bound.
    ///
    /// # Errors
    ///
    /// `SprintNotFound` if the sprint does not exist or the update is not
    /// acknowledged.
    pub fn apply_patch(&self, id: &str, patch: &SprintPatch) -> Result<Sprint> {
        let current = self.get(id)?;
        if patch.is_empty() {
            return Ok(current);
        }

        let end_change = patch.end_time_change(current.start_time, current.end_time);
        let mut fields = Document::new();
        if let Some(start) = patch.start_time {
            fields.insert(START_TIME_FIELD.to_string(), Value::from(start));
        }
        match end_change {
            None => {}
            Some(None) => {
                fields.insert(END_TIME_FIELD.to_string(), Value::Null);
            }
            Some(Some(end)) => {
                fields.insert(END_TIME_FIELD.to_string(), Value::from(end));
            }
        }

        let acked = self
            .db
            .store()
            .update_by_id(SPRINT_COLLECTION, &DocumentId::from(id), fields)?;
        if !acked {
            return Err(Error::sprint_not_found(id));
        }

        info!(
            target: "ticketmaster::sprint",
            sprint_id = id,
            start_time = ?patch.start_time,
            end_time = ?end_change,
            "Updated sprint"
        );
        self.get(id)
    }
}

fn decode(id: &DocumentId, document: Document) -> Result<Sprint> {
    from_document_with_id(id, ID_FIELD, document)
        .map_err(|e| Error::internal(format!("sprint {} does not decode: {}", id, e)))
}
