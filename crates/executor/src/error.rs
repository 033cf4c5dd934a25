//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Coded**: Each variant has a stable numeric code and HTTP status

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Code | HTTP |
/// |----------|----------|------|------|
/// | Validation | `IllegalPayload` | 1000 | 400 |
/// | Not Found | `SprintNotFound`, `MetricsNotFound`, `TicketNotFound` | 1001, 1003, 1004 | 404 |
/// | Write | `SprintNotCreated` | 1002 | 500 |
/// | System | `Internal`, `StoreUnavailable` | 5000, 5001 | 500, 503 |
///
/// # Example
///
/// ```ignore
/// use ticketmaster_executor::{Command, Error};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::SprintNotFound { id }) => {
///         println!("Sprint '{}' not found", id);
///     }
///     Err(e) => {
///         println!("Error {}: {}", e.code(), e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Validation ====================
    /// Payload failed shape, enum or type validation
    #[error("illegal payload: {reason}")]
    IllegalPayload {
        /// Rendered list of offending fields
        reason: String,
    },

    // ==================== Not Found ====================
    /// Sprint id does not resolve
    #[error("sprint not found: {id}")]
    SprintNotFound {
        /// Requested sprint id
        id: String,
    },

    /// Metric event id does not resolve
    #[error("metrics not found: {id}")]
    MetricsNotFound {
        /// Requested event id
        id: String,
    },

    /// Ticket id does not resolve
    #[error("ticket not found: {id}")]
    TicketNotFound {
        /// Requested ticket id
        id: String,
    },

    // ==================== Write ====================
    /// Sprint insert was not acknowledged
    #[error("sprint not created: {reason}")]
    SprintNotCreated {
        /// Store failure behind the lost insert
        reason: String,
    },

    // ==================== System ====================
    /// Store could not complete the operation
    #[error("store unavailable: {reason}")]
    StoreUnavailable {
        /// Store failure as reported by the gateway
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Stable numeric code carried in `base.code`
    pub fn code(&self) -> u32 {
        match self {
            Error::IllegalPayload { .. } => 1000,
            Error::SprintNotFound { .. } => 1001,
            Error::SprintNotCreated { .. } => 1002,
            Error::MetricsNotFound { .. } => 1003,
            Error::TicketNotFound { .. } => 1004,
            Error::Internal { .. } => 5000,
            Error::StoreUnavailable { .. } => 5001,
        }
    }

    /// HTTP status of the reply
    pub fn status(&self) -> u16 {
        match self {
            Error::IllegalPayload { .. } => 400,
            Error::SprintNotFound { .. }
            | Error::MetricsNotFound { .. }
            | Error::TicketNotFound { .. } => 404,
            Error::SprintNotCreated { .. } | Error::Internal { .. } => 500,
            Error::StoreUnavailable { .. } => 503,
        }
    }

    /// Fixed `base.message`
    pub fn message(&self) -> &'static str {
        match self {
            Error::IllegalPayload { .. } => "Illegal payload",
            Error::SprintNotFound { .. } => "Sprint not found",
            Error::SprintNotCreated { .. } => "Sprint not created",
            Error::MetricsNotFound { .. } => "Metrics not found",
            Error::TicketNotFound { .. } => "Ticket not found",
            Error::Internal { .. } => "Internal server error",
            Error::StoreUnavailable { .. } => "Store unavailable",
        }
    }

    /// `base.errorMessage`, when there is more to say than the message
    ///
    /// Not-found errors carry no detail.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::IllegalPayload { reason }
            | Error::SprintNotCreated { reason }
            | Error::StoreUnavailable { reason }
            | Error::Internal { reason } => Some(reason.clone()),
            Error::SprintNotFound { .. }
            | Error::MetricsNotFound { .. }
            | Error::TicketNotFound { .. } => None,
        }
    }

    /// Whether the failure is the server's fault rather than the caller's
    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }
}
