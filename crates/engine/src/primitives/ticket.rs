//! TicketStore: ticket CRUD
//!
//! Tickets are flat documents in the `tickets` collection, addressed by
//! their caller-supplied `id` field rather than by the store-generated
//! document id.
//!
//! ## Duplicate ids
//!
//! Creation does not check for an existing ticket with the same id. Update
//! and delete act on every document carrying the id, so duplicates converge
//! on the next update and all disappear on delete. `get` returns any one of
//! them.

use serde_json::Value;
use ticketmaster_core::{parse, DocumentId, Error, Result, Ticket, ValidationError};
use ticketmaster_storage::document::{from_document, to_document, Document};
use ticketmaster_storage::Filter;
use tracing::{debug, info};

use crate::database::Database;

/// Collection holding ticket documents
pub const TICKET_COLLECTION: &str = "tickets";

const ID_FIELD: &str = "id";

/// Ticket CRUD component
///
/// Stateless facade over Database; all state lives in the store.
#[derive(Clone, Debug)]
pub struct TicketStore {
    db: Database,
}

impl TicketStore {
    /// Create a new TicketStore
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate `payload` as a [`Ticket`] and store it.
    ///
    /// # Errors
    ///
    /// - `IllegalPayload` on shape violation (nothing is written)
    /// - `StoreUnavailable` if the insert is not acknowledged
    pub fn create(&self, payload: &Value) -> Result<Ticket> {
        let ticket: Ticket = parse(payload)?;
        let document = encode(&ticket)?;
        let doc_id = self.db.store().insert(TICKET_COLLECTION, document)?;

        info!(
            target: "ticketmaster::ticket",
            ticket_id = %ticket.id,
            document_id = %doc_id,
            status = %ticket.status,
            "Created ticket"
        );
        Ok(ticket)
    }

    /// Fetch a ticket by id.
    ///
    /// # Errors
    ///
    /// `TicketNotFound` if no ticket has this id.
    pub fn get(&self, id: &str) -> Result<Ticket> {
        match self.matching(id)?.into_iter().next() {
            Some((_, document)) => decode(document),
            None => Err(Error::ticket_not_found(id)),
        }
    }

    /// Fetch every ticket, in store order.
    pub fn list(&self) -> Result<Vec<Ticket>> {
        self.db
            .store()
            .find(TICKET_COLLECTION, &Filter::all())?
            .into_iter()
            .map(|(_, document)| decode(document))
            .collect()
    }

    /// Validate `payload` as a [`Ticket`] and write it over ticket `id`.
    ///
    /// Every field the payload carries is overwritten; optional fields it
    /// omits keep their stored value. The payload's `id` must equal `id`.
    ///
    /// # Errors
    ///
    /// - `IllegalPayload` on shape violation or id mismatch (nothing is written)
    /// - `TicketNotFound` if no ticket has this id or no update is acknowledged
    pub fn update(&self, id: &str, payload: &Value) -> Result<Ticket> {
        let ticket: Ticket = parse(payload)?;
        if ticket.id != id {
            return Err(ValidationError::single(
                ID_FIELD,
                format!("'{}' does not match ticket '{}'", ticket.id, id),
            )
            .into());
        }
        let fields = encode(&ticket)?;

        let targets = self.matching(id)?;
        let mut acked = 0;
        for (doc_id, _) in &targets {
            if self
                .db
                .store()
                .update_by_id(TICKET_COLLECTION, doc_id, fields.clone())?
            {
                acked += 1;
            }
        }
        if acked == 0 {
            return Err(Error::ticket_not_found(id));
        }

        info!(
            target: "ticketmaster::ticket",
            ticket_id = id,
            documents = acked,
            status = %ticket.status,
            "Updated ticket"
        );
        self.get(id)
    }

    /// Delete every ticket with this id.
    ///
    /// Deleting an unknown id is not an error. Returns how many documents
    /// were removed.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the store cannot complete a lookup or delete.
    pub fn delete(&self, id: &str) -> Result<usize> {
        let mut removed = 0;
        for (doc_id, _) in self.matching(id)? {
            if self.db.store().delete_by_id(TICKET_COLLECTION, &doc_id)? {
                removed += 1;
            }
        }

        debug!(target: "ticketmaster::ticket", ticket_id = id, removed, "Deleted ticket");
        Ok(removed)
    }

    fn matching(&self, id: &str) -> Result<Vec<(DocumentId, Document)>> {
        Ok(self
            .db
            .store()
            .find(TICKET_COLLECTION, &Filter::all().eq(ID_FIELD, id))?)
    }
}

fn encode(ticket: &Ticket) -> Result<Document> {
    to_document(ticket).map_err(|e| Error::internal(format!("ticket does not encode: {}", e)))
}

fn decode(document: Document) -> Result<Ticket> {
    from_document(document).map_err(|e| Error::internal(format!("ticket does not decode: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ticketmaster_core::{TicketPriority, TicketStatus};

    fn setup() -> TicketStore {
        Database::in_memory().tickets()
    }

    fn ticket_payload(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "title": "Flaky build",
            "description": "CI fails every other run",
            "status": status,
            "priority": "medium",
            "type": "task",
            "reporter_id": "u1"
        })
    }

    // ========================================
    // create / get / list
    // ========================================

    #[test]
    fn test_create_then_get() {
        let tickets = setup();
        let created = tickets.create(&ticket_payload("T-1", "open")).unwrap();
        assert_eq!(created.priority, TicketPriority::Medium);
        assert_eq!(tickets.get("T-1").unwrap(), created);
    }

    #[test]
    fn test_create_rejects_bad_payload_without_writing() {
        let tickets = setup();
        let mut payload = ticket_payload("T-1", "open");
        payload["type"] = json!("story");
        assert!(tickets.create(&payload).unwrap_err().is_validation());
        assert!(tickets.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let err = setup().get("T-404").unwrap_err();
        assert!(matches!(err, Error::TicketNotFound { ref id } if id == "T-404"));
    }

    #[test]
    fn test_list_returns_every_ticket() {
        let tickets = setup();
        tickets.create(&ticket_payload("T-1", "open")).unwrap();
        tickets.create(&ticket_payload("T-2", "done")).unwrap();

        let mut ids: Vec<String> = tickets.list().unwrap().into_iter().map(|t| t.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["T-1", "T-2"]);
    }

    // ========================================
    // update
    // ========================================

    #[test]
    fn test_update_overwrites_fields() {
        let tickets = setup();
        let mut payload = ticket_payload("T-1", "open");
        payload["labels"] = json!(["ci"]);
        tickets.create(&payload).unwrap();

        let updated = tickets
            .update("T-1", &ticket_payload("T-1", "in_progress"))
            .unwrap();
        assert_eq!(updated.status, TicketStatus::InProgress);
        // Omitted optional keeps its stored value
        assert_eq!(updated.labels, Some(vec!["ci".to_string()]));
        assert_eq!(tickets.get("T-1").unwrap(), updated);
    }

    #[test]
    fn test_update_rejects_mismatched_id() {
        let tickets = setup();
        tickets.create(&ticket_payload("T-1", "open")).unwrap();
        let err = tickets
            .update("T-1", &ticket_payload("T-2", "done"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(tickets.get("T-1").unwrap().status, TicketStatus::Open);
    }

    #[test]
    fn test_update_missing_ticket() {
        let err = setup()
            .update("T-9", &ticket_payload("T-9", "open"))
            .unwrap_err();
        assert!(matches!(err, Error::TicketNotFound { .. }));
    }

    #[test]
    fn test_update_converges_duplicates() {
        let tickets = setup();
        tickets.create(&ticket_payload("T-1", "open")).unwrap();
        tickets.create(&ticket_payload("T-1", "done")).unwrap();

        tickets
            .update("T-1", &ticket_payload("T-1", "in_progress"))
            .unwrap();
        let all = tickets.list().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| t.status == TicketStatus::InProgress));
    }

    // ========================================
    // delete
    // ========================================

    #[test]
    fn test_delete_removes_ticket() {
        let tickets = setup();
        tickets.create(&ticket_payload("T-1", "open")).unwrap();
        tickets.create(&ticket_payload("T-2", "open")).unwrap();

        assert_eq!(tickets.delete("T-1").unwrap(), 1);
        assert!(matches!(
            tickets.get("T-1").unwrap_err(),
            Error::TicketNotFound { .. }
        ));
        assert!(tickets.get("T-2").is_ok());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        assert_eq!(setup().delete("T-404").unwrap(), 0);
    }

    #[test]
    fn test_delete_removes_duplicates() {
        let tickets = setup();
        tickets.create(&ticket_payload("T-1", "open")).unwrap();
        tickets.create(&ticket_payload("T-1", "open")).unwrap();
        assert_eq!(tickets.delete("T-1").unwrap(), 2);
        assert!(tickets.list().unwrap().is_empty());
    }
}
