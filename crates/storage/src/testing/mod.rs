//! Testing utilities for exercising gateway failure paths
//!
//! - **FaultyStore**: Wraps any store and injects failures for chosen operations
//!
//! # Example
//!
//! ```ignore
//! use ticketmaster_storage::testing::{Fault, FaultyStore, Operation};
//! use ticketmaster_storage::MemoryStore;
//!
//! let store = FaultyStore::new(MemoryStore::new());
//! store.fail_next(Operation::Insert, Fault::Unavailable, 1);
//! assert!(store.insert("sprints", doc).is_err());
//! ```

mod faulty;

pub use faulty::{Fault, FaultyStore, Operation};
