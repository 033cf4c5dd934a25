//! Tickets
//!
//! A ticket carries its own caller-supplied `id`; the store-generated
//! document id never leaves the storage layer. Updates replace the whole
//! ticket, so create and update share one shape.

use serde::{Deserialize, Serialize};

use crate::schema::{FieldKind, FieldSpec, Schema, Shape};
use crate::types::{TicketPriority, TicketStatus, TicketType};

/// A unit of tracked work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Caller-supplied ticket id
    pub id: String,
    /// Short summary
    pub title: String,
    /// Full description
    pub description: String,
    /// Workflow state
    pub status: TicketStatus,
    /// Priority
    pub priority: TicketPriority,
    /// Kind of work
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    /// Who filed the ticket
    pub reporter_id: String,
    /// Vector embedding of the ticket text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f64>>,
    /// Parent ticket, for sub-tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_ticket_id: Option<String>,
    /// Who is working on it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Free-form labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl Schema for Ticket {
    const SHAPE: Shape = Shape {
        name: "ticket",
        fields: &[
            FieldSpec::required("id", FieldKind::String),
            FieldSpec::required("title", FieldKind::String),
            FieldSpec::required("description", FieldKind::String),
            FieldSpec::required("status", FieldKind::Enum(TicketStatus::NAMES)),
            FieldSpec::required("priority", FieldKind::Enum(TicketPriority::NAMES)),
            FieldSpec::required("type", FieldKind::Enum(TicketType::NAMES)),
            FieldSpec::required("reporter_id", FieldKind::String),
            FieldSpec::optional("embedding", FieldKind::NumberList),
            FieldSpec::optional("parent_ticket_id", FieldKind::String),
            FieldSpec::optional("assignee_id", FieldKind::String),
            FieldSpec::optional("labels", FieldKind::StringList),
        ],
        forbidden: &[],
    };
}
