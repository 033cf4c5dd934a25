//! The Executor - single entry point to the Ticketmaster engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate engine component and converts results to outputs.

use std::sync::Arc;

use ticketmaster_engine::Database;
use tracing::{debug, warn};

use crate::bridge::Primitives;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the engine.
///
/// The Executor is **stateless**: it holds the engine components bound to a
/// [`Database`] but maintains no state of its own. All state lives in the
/// store.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and cheap to clone; clones share the same
/// database.
///
/// # Example
///
/// ```ignore
/// use ticketmaster_executor::{Command, Database, Executor};
///
/// let executor = Executor::new(&Database::in_memory());
///
/// // Single command execution
/// let output = executor.execute(Command::SprintCreate {
///     start_time: Some(1_700_000_000_000),
///     end_time: None,
/// })?;
///
/// // Batch execution
/// let results = executor.execute_many(vec![
///     Command::SprintList,
///     Command::MetricGet { event_id: "e1".into() },
/// ]);
/// ```
#[derive(Clone, Debug)]
pub struct Executor {
    primitives: Arc<Primitives>,
}

impl Executor {
    /// Create a new executor bound to a database.
    pub fn new(db: &Database) -> Self {
        Self {
            primitives: Arc::new(Primitives::new(db)),
        }
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let write = cmd.is_write();
        let p = &self.primitives;

        let result = match cmd {
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),

            // Sprint commands
            Command::SprintCreate {
                start_time,
                end_time,
            } => crate::handlers::sprint::sprint_create(p, start_time, end_time),
            Command::SprintList => crate::handlers::sprint::sprint_list(p),
            Command::SprintGet { id } => crate::handlers::sprint::sprint_get(p, id),
            Command::SprintEmitEvent { id, event } => {
                crate::handlers::sprint::sprint_emit_event(p, id, event)
            }
            Command::SprintUpdate { id, patch } => {
                crate::handlers::sprint::sprint_update(p, id, patch)
            }

            // Metric commands
            Command::MetricEmit { metric } => crate::handlers::metrics::metric_emit(p, metric),
            Command::MetricGet { event_id } => crate::handlers::metrics::metric_get(p, event_id),
            Command::MetricQuery { query } => crate::handlers::metrics::metric_query(p, query),

            // Ticket commands
            Command::TicketCreate { ticket } => crate::handlers::ticket::ticket_create(p, ticket),
            Command::TicketList => crate::handlers::ticket::ticket_list(p),
            Command::TicketGet { id } => crate::handlers::ticket::ticket_get(p, id),
            Command::TicketUpdate { id, ticket } => {
                crate::handlers::ticket::ticket_update(p, id, ticket)
            }
            Command::TicketDelete { id } => crate::handlers::ticket::ticket_delete(p, id),
        };

        match &result {
            Ok(_) => debug!(
                target: "ticketmaster::executor",
                command = name,
                write,
                "Command succeeded"
            ),
            Err(e) if e.is_server_error() => warn!(
                target: "ticketmaster::executor",
                command = name,
                write,
                code = e.code(),
                error = %e,
                "Command failed"
            ),
            Err(e) => debug!(
                target: "ticketmaster::executor",
                command = name,
                write,
                code = e.code(),
                error = %e,
                "Command rejected"
            ),
        }
        result
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let results = executor.execute_many(vec![cmd1, cmd2, cmd3]);
    /// // results[0] corresponds to cmd1, etc.
    /// ```
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }
}

// Executor is thread-safe
#[cfg(test)]
mod send_sync {
    use super::Executor;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_executor_is_send_sync() {
        assert_send_sync::<Executor>();
    }
}
