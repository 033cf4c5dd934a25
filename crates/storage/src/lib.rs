//! Document store gateway for Ticketmaster
//!
//! This crate implements the narrow storage boundary the engine talks to:
//! - DocumentStore: The gateway contract (insert, find, update, append)
//! - Filter: Conjunctive field predicates (equality, inclusive range, membership)
//! - MemoryStore: DashMap + FxHashMap, one shard per collection
//! - FileStore: MemoryStore persisted as per-collection JSON snapshots
//! - testing: Fault injection wrappers for exercising failure paths
//!
//! # Ownership
//!
//! The store is the sole owner of persisted state. Callers hold no cached
//! copies and re-fetch on every read.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod file;
pub mod filter;
pub mod memory;
pub mod testing;
pub mod traits;

pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use filter::{Filter, Predicate};
pub use memory::MemoryStore;
pub use traits::DocumentStore;
