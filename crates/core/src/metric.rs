//! Standalone metric events and range queries
//!
//! Metric events are flat records stored independently of sprints. They are
//! written once and never mutated, and are retrieved by time range plus an
//! optional status constraint.

use serde::{Deserialize, Serialize};

use crate::schema::{FieldKind, FieldSpec, Schema, Shape};
use crate::types::{TicketStatus, UnixMillis};

/// A ticket-related measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricEvent {
    /// Caller-supplied event id
    pub event_id: String,
    /// When the measurement was taken (unix ms)
    pub timestamp: UnixMillis,
    /// What was measured
    pub event_detail: String,
    /// Measured value
    pub event_value: i64,
    /// Ticket the measurement refers to
    pub ticket_id: String,
    /// Ticket status at measurement time
    pub ticket_status: TicketStatus,
}

impl Schema for MetricEvent {
    const SHAPE: Shape = Shape {
        name: "metric event",
        fields: &[
            FieldSpec::required("event_id", FieldKind::String),
            FieldSpec::required("timestamp", FieldKind::Integer),
            FieldSpec::required("event_detail", FieldKind::String),
            FieldSpec::required("event_value", FieldKind::Integer),
            FieldSpec::required("ticket_id", FieldKind::String),
            FieldSpec::required("ticket_status", FieldKind::Enum(TicketStatus::NAMES)),
        ],
        forbidden: &[],
    };
}

/// Status constraint of a metric query
///
/// A single status requires equality; a list requires membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusFilter {
    /// `ticket_status == status`
    One(TicketStatus),
    /// `ticket_status ∈ statuses`
    Many(Vec<TicketStatus>),
}

impl StatusFilter {
    /// Whether `status` satisfies this constraint
    pub fn accepts(&self, status: TicketStatus) -> bool {
        match self {
            Self::One(expected) => *expected == status,
            Self::Many(allowed) => allowed.contains(&status),
        }
    }
}

/// Range query over metric events
///
/// `start` and `end` are both inclusive. `start > end` is not an error; it
/// simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricQuery {
    /// Lower bound (inclusive)
    pub start: UnixMillis,
    /// Upper bound (inclusive)
    pub end: UnixMillis,
    /// Optional status constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_status: Option<StatusFilter>,
}

impl MetricQuery {
    /// Whether `event` satisfies every constraint of this query
    pub fn matches(&self, event: &MetricEvent) -> bool {
        self.start <= event.timestamp
            && event.timestamp <= self.end
            && self
                .ticket_status
                .as_ref()
                .map_or(true, |filter| filter.accepts(event.ticket_status))
    }
}

impl Schema for MetricQuery {
    const SHAPE: Shape = Shape {
        name: "metric query",
        fields: &[
            FieldSpec::required("start", FieldKind::Integer),
            FieldSpec::required("end", FieldKind::Integer),
            FieldSpec::optional("ticket_status", FieldKind::EnumOrEnumList(TicketStatus::NAMES)),
        ],
        forbidden: &[],
    };
}
