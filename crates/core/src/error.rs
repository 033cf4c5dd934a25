//! Error types for Ticketmaster
//!
//! This module defines the domain error taxonomy shared by the engine
//! components. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors
///
/// | Variant | Recoverable by caller | Mutates state |
/// |---------|-----------------------|---------------|
/// | `IllegalPayload` | yes, fix the input | never |
/// | `SprintNotFound` / `MetricsNotFound` / `TicketNotFound` | yes, fix the id | never |
/// | `SprintNotCreated` | retry later | insert may have landed |
/// | `StoreUnavailable` | retry later | write may have landed |
/// | `Internal` | no | unknown |
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed shape, enum or type validation
    #[error("illegal payload: {0}")]
    IllegalPayload(#[from] ValidationError),

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

    /// Store did not acknowledge the sprint insert
    #[error("sprint not created: {reason}")]
    SprintNotCreated {
        /// Underlying store failure
        reason: String,
    },

    /// Store could not complete the operation
    #[error("store unavailable: {reason}")]
    StoreUnavailable {
        /// Underlying store failure
        reason: String,
    },

    /// Invariant violation, e.g. a stored document that no longer decodes
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Sprint id does not resolve
    pub fn sprint_not_found(id: impl Into<String>) -> Self {
        Error::SprintNotFound { id: id.into() }
    }

    /// Metric event id does not resolve
    pub fn metrics_not_found(id: impl Into<String>) -> Self {
        Error::MetricsNotFound { id: id.into() }
    }

    /// Ticket id does not resolve
    pub fn ticket_not_found(id: impl Into<String>) -> Self {
        Error::TicketNotFound { id: id.into() }
    }

    /// Invariant violation
    pub fn internal(reason: impl Into<String>) -> Self {
        Error::Internal {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before any store mutation was attempted
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::IllegalPayload(_))
    }
}
