//! Engine components
//!
//! All three components are stateless facades over the [`Database`] handle:
//! - **SprintManager**: sprint lifecycle (create, append event, patch)
//! - **MetricQueryEngine**: metric emission and range/status queries
//! - **TicketStore**: ticket create, read, replace, delete
//!
//! They hold nothing beyond a `Database` clone, so any number of instances
//! can run side by side on the same store. Every read re-fetches from the
//! store; there is no cache to invalidate.
//!
//! Operations that take untyped JSON validate it against the payload's shape
//! before touching the store. A validation failure never mutates state.
//!
//! [`Database`]: crate::Database

pub mod metrics;
pub mod sprint;
pub mod ticket;

pub use metrics::{MetricQueryEngine, METRICS_COLLECTION};
pub use sprint::{SprintManager, SPRINT_COLLECTION};
pub use ticket::{TicketStore, TICKET_COLLECTION};
