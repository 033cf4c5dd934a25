//! Sprint-scoped data model
//!
//! A [`Sprint`] is a time window that accumulates an append-only sequence of
//! ticket [`Event`]s. Events have no identity of their own; once appended they
//! are never modified, removed or reordered.

use serde::{Deserialize, Serialize};

use crate::schema::{FieldKind, FieldSpec, Schema, Shape};
use crate::types::{DocumentId, TicketPriority, TicketStatus, UnixMillis};

/// A ticket's status and priority at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Ticket the event refers to
    pub ticket_id: String,
    /// When the event happened (unix ms)
    pub timestamp: UnixMillis,
    /// Free-form description
    pub description: String,
    /// Ticket status at `timestamp`
    pub status: TicketStatus,
    /// Ticket priority at `timestamp`
    pub priority: TicketPriority,
}

impl Schema for Event {
    const SHAPE: Shape = Shape {
        name: "event",
        fields: &[
            FieldSpec::required("ticket_id", FieldKind::String),
            FieldSpec::required("timestamp", FieldKind::Integer),
            FieldSpec::required("description", FieldKind::String),
            FieldSpec::required("status", FieldKind::Enum(TicketStatus::NAMES)),
            FieldSpec::required("priority", FieldKind::Enum(TicketPriority::NAMES)),
        ],
        forbidden: &[],
    };
}

/// A time-bounded container of ticket events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Store-generated id
    pub id: DocumentId,
    /// Window start (unix ms)
    pub start_time: UnixMillis,
    /// Window end (unix ms); absent for open-ended sprints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<UnixMillis>,
    /// Events in append order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Sprint {
    /// Number of events recorded so far
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Most recently appended event
    pub fn last_event(&self) -> Option<&Event> {
        self.events.last()
    }
}

/// Clamp an end time against its start time.
///
/// An end time earlier than or equal to the start is treated as absent
/// rather than rejected.
pub fn resolve_end_time(start_time: UnixMillis, end_time: Option<UnixMillis>) -> Option<UnixMillis> {
    end_time.filter(|end| *end > start_time)
}

/// Partial sprint update
///
/// Only the window bounds are mutable through a patch; `id` and `events`
/// are rejected by the shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintPatch {
    /// New window start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<UnixMillis>,
    /// New window end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<UnixMillis>,
}

impl SprintPatch {
    /// Whether the patch sets nothing
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    /// End-time change this patch requests against the stored window,
    /// after the creation clamp.
    ///
    /// The effective window is the patch's bounds, falling back to the stored
    /// ones. An effective end at or before the effective start is cleared.
    ///
    /// - `None`: leave the stored end time untouched
    /// - `Some(None)`: clear it
    /// - `Some(Some(t))`: set it to `t`
    pub fn end_time_change(
        &self,
        stored_start: UnixMillis,
        stored_end: Option<UnixMillis>,
    ) -> Option<Option<UnixMillis>> {
        let start = self.start_time.unwrap_or(stored_start);
        let resolved = resolve_end_time(start, self.end_time.or(stored_end));
        if self.end_time.is_some() || resolved != stored_end {
            Some(resolved)
        } else {
            None
        }
    }
}

impl Schema for SprintPatch {
    const SHAPE: Shape = Shape {
        name: "sprint update",
        fields: &[
            FieldSpec::optional("start_time", FieldKind::Integer),
            FieldSpec::optional("end_time", FieldKind::Integer),
        ],
        forbidden: &["id", "events"],
    };
}
