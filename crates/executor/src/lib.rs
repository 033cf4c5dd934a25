//! # Ticketmaster Executor
//!
//! The command layer of the Ticketmaster sprint, ticket and metrics service.
//!
//! This is the only crate a transport needs to import. It provides:
//! - [`Command`]/[`Output`] - The instruction set, one command per route
//! - [`Executor`] - Dispatches commands to the engine
//! - [`Error`] - Serializable errors with stable codes
//! - [`Response`] - The `{ base, data }` envelope every reply is wrapped in
//!
//! ## Quick Start
//!
//! ```text
//! use ticketmaster_executor::{Command, Database, Executor};
//!
//! let executor = Executor::new(&Database::in_memory());
//!
//! let sprint = executor.execute(Command::SprintCreate {
//!     start_time: None,
//!     end_time: None,
//! })?;
//! ```
//!
//! ## Error Codes
//!
//! | Error | Code | HTTP |
//! |-------|------|------|
//! | `IllegalPayload` | 1000 | 400 |
//! | `SprintNotFound` | 1001 | 404 |
//! | `SprintNotCreated` | 1002 | 500 |
//! | `MetricsNotFound` | 1003 | 404 |
//! | `TicketNotFound` | 1004 | 404 |
//! | `Internal` | 5000 | 500 |
//! | `StoreUnavailable` | 5001 | 503 |

#![warn(missing_docs)]

pub(crate) mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod response;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything transports need is re-exported here
// =============================================================================

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use response::{envelope, Base, Response, SUCCESS_CODE};

// Re-export domain types so callers don't need ticketmaster-core directly
pub use ticketmaster_core::{
    DocumentId, Event, MetricEvent, MetricQuery, Sprint, StatusFilter, Ticket, TicketPriority,
    TicketStatus, TicketType, UnixMillis,
};

// Re-export the context handle and configuration so callers don't need
// ticketmaster-engine directly
pub use ticketmaster_engine::{
    Config, ConfigError, Database, LogFormat, LoggingConfig, ServerConfig, StorageConfig,
    StorageMode, CONFIG_FILE_NAME,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
