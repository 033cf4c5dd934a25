//! Bridge module: direct access to engine components.
//!
//! [`Primitives`] bundles the components every handler dispatches to, all
//! bound to one [`Database`] handle.

use ticketmaster_engine::{Database, MetricQueryEngine, SprintManager, TicketStore};

/// Engine components shared by every handler.
#[derive(Clone, Debug)]
pub struct Primitives {
    /// Sprint lifecycle
    pub sprints: SprintManager,
    /// Metric emission and queries
    pub metrics: MetricQueryEngine,
    /// Ticket CRUD
    pub tickets: TicketStore,
}

impl Primitives {
    /// Bind every component to `db`.
    pub fn new(db: &Database) -> Self {
        Self {
            sprints: db.sprints(),
            metrics: db.metrics(),
            tickets: db.tickets(),
        }
    }
}
