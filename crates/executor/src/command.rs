//! Command enum defining all Ticketmaster operations.
//!
//! Commands are the "instruction set" of the service. Every route maps to
//! exactly one variant.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or executable code
//!
//! Payload-carrying variants hold the request body as untyped JSON. The
//! engine validates it against the payload's shape before anything is
//! written, so a malformed body surfaces as `Error::IllegalPayload`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ticketmaster_core::UnixMillis;

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Service | 1 | Liveness |
/// | Sprint | 5 | Sprint lifecycle and event log |
/// | Metric | 3 | Metric emission and queries |
/// | Ticket | 5 | Ticket CRUD |
///
/// # Example
///
/// ```ignore
/// use ticketmaster_executor::Command;
/// use serde_json::json;
///
/// let cmd = Command::SprintEmitEvent {
///     id: sprint_id,
///     event: json!({"ticket_id": "t1", "timestamp": 100, "description": "d",
///                   "status": "open", "priority": "low"}),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Service (1) ====================
    /// Liveness check.
    /// Returns: `Output::Pong`
    Ping,

    // ==================== Sprint (5) ====================
    /// Create a sprint. `start_time` defaults to now; an `end_time` at or
    /// before the start is dropped.
    /// Returns: `Output::Sprint`
    SprintCreate {
        /// Window start (unix ms)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_time: Option<UnixMillis>,
        /// Window end (unix ms)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_time: Option<UnixMillis>,
    },

    /// List every sprint.
    /// Returns: `Output::Sprints`
    SprintList,

    /// Fetch one sprint.
    /// Returns: `Output::Sprint`
    SprintGet {
        /// Sprint id
        id: String,
    },

    /// Append an event to a sprint's event log.
    /// Returns: `Output::Sprint` (re-read after the append)
    SprintEmitEvent {
        /// Sprint id
        id: String,
        /// Event payload
        event: Value,
    },

    /// Merge a partial update into a sprint.
    /// Returns: `Output::Sprint` (re-read after the update)
    SprintUpdate {
        /// Sprint id
        id: String,
        /// Subset of `{start_time, end_time}`
        patch: Value,
    },

    // ==================== Metric (3) ====================
    /// Store a metric event.
    /// Returns: `Output::Metric`
    MetricEmit {
        /// Metric event payload
        metric: Value,
    },

    /// Fetch a metric event by its `event_id`.
    /// Returns: `Output::Metric`
    MetricGet {
        /// Caller-supplied event id
        event_id: String,
    },

    /// Range/status query over metric events.
    /// Returns: `Output::Metrics`
    MetricQuery {
        /// `{start, end, ticket_status?}`
        query: Value,
    },

    // ==================== Ticket (5) ====================
    /// Store a new ticket.
    /// Returns: `Output::Ticket`
    TicketCreate {
        /// Full ticket payload, including its `id`
        ticket: Value,
    },

    /// List every ticket.
    /// Returns: `Output::Tickets`
    TicketList,

    /// Fetch one ticket.
    /// Returns: `Output::Ticket`
    TicketGet {
        /// Caller-supplied ticket id
        id: String,
    },

    /// Write a full ticket over an existing one. The payload's `id` must
    /// match `id`.
    /// Returns: `Output::Ticket` (re-read after the update)
    TicketUpdate {
        /// Caller-supplied ticket id
        id: String,
        /// Full ticket payload
        ticket: Value,
    },

    /// Delete a ticket. Unknown ids succeed.
    /// Returns: `Output::Unit`
    TicketDelete {
        /// Caller-supplied ticket id
        id: String,
    },
}

impl Command {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::SprintCreate { .. } => "SprintCreate",
            Command::SprintList => "SprintList",
            Command::SprintGet { .. } => "SprintGet",
            Command::SprintEmitEvent { .. } => "SprintEmitEvent",
            Command::SprintUpdate { .. } => "SprintUpdate",
            Command::MetricEmit { .. } => "MetricEmit",
            Command::MetricGet { .. } => "MetricGet",
            Command::MetricQuery { .. } => "MetricQuery",
            Command::TicketCreate { .. } => "TicketCreate",
            Command::TicketList => "TicketList",
            Command::TicketGet { .. } => "TicketGet",
            Command::TicketUpdate { .. } => "TicketUpdate",
            Command::TicketDelete { .. } => "TicketDelete",
        }
    }

    /// `base.message` of a successful reply
    ///
    /// Appending a sprint event reports "Metric emitted", matching the
    /// message existing clients already see for that route.
    pub fn success_message(&self) -> &'static str {
        match self {
            Command::Ping => "pong",
            Command::SprintCreate { .. } => "Sprint created",
            Command::SprintUpdate { .. } => "Sprint updated",
            Command::SprintEmitEvent { .. } | Command::MetricEmit { .. } => "Metric emitted",
            Command::TicketCreate { .. } => "Ticket created",
            Command::TicketUpdate { .. } => "Ticket updated",
            Command::TicketDelete { .. } => "Ticket deleted",
            Command::SprintList
            | Command::SprintGet { .. }
            | Command::MetricGet { .. }
            | Command::MetricQuery { .. }
            | Command::TicketList
            | Command::TicketGet { .. } => "success",
        }
    }

    /// Whether the command may write to the store
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::SprintCreate { .. }
                | Command::SprintEmitEvent { .. }
                | Command::SprintUpdate { .. }
                | Command::MetricEmit { .. }
                | Command::TicketCreate { .. }
                | Command::TicketUpdate { .. }
                | Command::TicketDelete { .. }
        )
    }
}
