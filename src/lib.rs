//! Ticketmaster - sprint lifecycle and ticket metrics over a document store
//!
//! Ticketmaster accepts requests describing sprints, sprint-scoped ticket
//! events and standalone metric events, validates their payloads, and
//! persists/queries them through a narrow document store gateway.
//!
//! # Quick Start
//!
//! ```ignore
//! use ticketmaster::{Command, Database, Executor, Output};
//!
//! let executor = Executor::new(&Database::in_memory());
//!
//! let output = executor.execute(Command::SprintCreate {
//!     start_time: None,
//!     end_time: None,
//! })?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The HTTP surface lives in `ticketmaster-server` and translates routes into
//! commands. Storage and engine internals are not exposed here.

// Re-export the public API from ticketmaster-executor
pub use ticketmaster_executor::*;
