//! Sprint and metric engine for Ticketmaster
//!
//! This crate sits between the executor and the document store:
//! - Database: explicit context handle owning the store connection
//! - Config: `ticketmaster.toml` loading and environment overrides
//! - SprintManager: sprint creation, event append, partial update
//! - MetricQueryEngine: metric emission and range/status queries
//! - TicketStore: ticket CRUD keyed by the caller-supplied ticket id
//!
//! No component caches documents. Every read goes back to the store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod primitives;

pub use database::{
    Config, ConfigError, Database, LogFormat, LoggingConfig, ServerConfig, StorageConfig,
    StorageMode, CONFIG_FILE_NAME,
};
pub use primitives::{
    MetricQueryEngine, SprintManager, TicketStore, METRICS_COLLECTION, SPRINT_COLLECTION,
    TICKET_COLLECTION,
};
