//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant
//! (though the values may differ based on store state).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ticketmaster_core::{MetricEvent, Sprint, Ticket};

use crate::{Error, Result};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use ticketmaster_executor::{Command, Output};
///
/// match executor.execute(Command::SprintGet { id })? {
///     Output::Sprint(sprint) => println!("{} events", sprint.events.len()),
///     _ => unreachable!("SprintGet always returns Sprint"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Ping response
    Pong {
        /// Service version
        version: String,
    },

    /// A single sprint
    Sprint(Sprint),

    /// Sprints in store order
    Sprints(Vec<Sprint>),

    /// A single metric event
    Metric(MetricEvent),

    /// Metric events in store order
    Metrics(Vec<MetricEvent>),

    /// A single ticket
    Ticket(Ticket),

    /// Tickets in store order
    Tickets(Vec<Ticket>),

    /// Success with nothing to return
    Unit,
}

impl Output {
    /// JSON placed in the envelope's `data` field, `None` for [`Output::Unit`].
    ///
    /// # Errors
    ///
    /// `Error::Internal` if the value does not encode.
    pub fn into_data(self) -> Result<Option<Value>> {
        let encoded = match self {
            Output::Unit => return Ok(None),
            Output::Pong { version } => serde_json::to_value(PongData { version }),
            Output::Sprint(sprint) => serde_json::to_value(sprint),
            Output::Sprints(sprints) => serde_json::to_value(sprints),
            Output::Metric(metric) => serde_json::to_value(metric),
            Output::Metrics(metrics) => serde_json::to_value(metrics),
            Output::Ticket(ticket) => serde_json::to_value(ticket),
            Output::Tickets(tickets) => serde_json::to_value(tickets),
        };
        encoded.map(Some).map_err(|e| Error::Internal {
            reason: format!("output does not encode: {}", e),
        })
    }
}

#[derive(Serialize)]
struct PongData {
    version: String,
}
