//! Database context handle
//!
//! A `Database` owns the process-wide document store connection. It is
//! constructed once at startup and handed to every component that needs
//! store access. There is no global handle and no "not yet initialized"
//! state: a `Database` value always wraps a live store.
//!
//! # Example
//!
//! ```ignore
//! use ticketmaster_engine::{Database, SprintManager};
//!
//! let db = Database::in_memory();
//! let sprints = SprintManager::new(db.clone());
//! let sprint = sprints.create(None, None)?;
//! ```

pub mod config;

pub use config::{
    Config, ConfigError, LogFormat, LoggingConfig, ServerConfig, StorageConfig, StorageMode,
    CONFIG_FILE_NAME,
};

use std::fmt;
use std::sync::Arc;

use ticketmaster_core::Result;
use ticketmaster_storage::{DocumentStore, FileStore, MemoryStore};
use tracing::info;

use crate::primitives::{MetricQueryEngine, SprintManager, TicketStore};

/// Shared handle to the document store
///
/// Cloning is cheap; every clone refers to the same store.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    /// Database backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Database backed by the given store
    pub fn with_store(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Database backed by an already shared store
    ///
    /// Lets tests keep their own handle on the store (for example a
    /// `FaultyStore` whose faults they arm mid-test).
    pub fn from_arc(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Open the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` for an unknown storage mode and
    /// `Error::StoreUnavailable` if the file store cannot be opened.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let mode = config
            .storage_mode()
            .map_err(|e| ticketmaster_core::Error::internal(e.to_string()))?;
        match mode {
            StorageMode::Memory => {
                info!(target: "ticketmaster::db", "Opened in-memory store");
                Ok(Self::in_memory())
            }
            StorageMode::File => {
                let store = FileStore::open(&config.data_dir)?;
                info!(
                    target: "ticketmaster::db",
                    data_dir = %config.data_dir.display(),
                    "Opened file store"
                );
                Ok(Self::with_store(store))
            }
        }
    }

    /// The underlying store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Sprint lifecycle component bound to this database
    pub fn sprints(&self) -> SprintManager {
        SprintManager::new(self.clone())
    }

    /// Metric query component bound to this database
    pub fn metrics(&self) -> MetricQueryEngine {
        MetricQueryEngine::new(self.clone())
    }

    /// Ticket CRUD component bound to this database
    pub fn tickets(&self) -> TicketStore {
        TicketStore::new(self.clone())
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
