//! Core types for Ticketmaster
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentId: Store-generated identifier for persisted documents
//! - TicketStatus / TicketPriority: Closed enums shared by every payload
//! - Event, Sprint, SprintPatch: Sprint-scoped data model
//! - MetricEvent, MetricQuery, StatusFilter: Standalone metric data model
//! - Ticket, TicketType: Ticket records
//! - Schema: Declarative payload shapes and validation
//! - Error: Domain error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metric;
pub mod schema;
pub mod sprint;
pub mod ticket;
pub mod types;

pub use error::{Error, Result};
pub use metric::{MetricEvent, MetricQuery, StatusFilter};
pub use schema::{parse, validate, FieldKind, FieldSpec, FieldViolation, Schema, Shape, ValidationError};
pub use sprint::{resolve_end_time, Event, Sprint, SprintPatch};
pub use ticket::Ticket;
pub use types::{now_millis, DocumentId, TicketPriority, TicketStatus, TicketType, UnixMillis};
