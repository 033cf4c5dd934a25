//! HTTP surface for Ticketmaster
//!
//! Maps each route onto one executor [`Command`] and wraps the result in the
//! `{ base, data }` envelope:
//!
//! | Route | Command |
//! |-------|---------|
//! | `POST /sprint?start_time&end_time` | `SprintCreate` |
//! | `GET /sprint` | `SprintList` |
//! | `GET /sprint/{id}` | `SprintGet` |
//! | `POST /sprint/{id}/emit_event` | `SprintEmitEvent` |
//! | `PUT /sprint/{id}` | `SprintUpdate` |
//! | `POST /metrics/emit` | `MetricEmit` |
//! | `GET /metrics/{id}` | `MetricGet` |
//! | `POST /metrics/query` | `MetricQuery` |
//! | `POST /ticket` | `TicketCreate` |
//! | `GET /ticket` | `TicketList` |
//! | `GET /ticket/{id}` | `TicketGet` |
//! | `PUT /ticket/{id}` | `TicketUpdate` |
//! | `DELETE /ticket/{id}` | `TicketDelete` |
//!
//! Commands run on the blocking pool; store calls block. A panic there is
//! logged and answered with an `Internal` envelope.
//!
//! [`Command`]: ticketmaster_executor::Command

#![warn(missing_docs)]

pub mod commands;
pub mod handlers;
pub mod logging;

use std::future::Future;

use axum::routing::{get, post};
use axum::{middleware, Router};
use ticketmaster_executor::Executor;
use tokio::net::TcpListener;

/// State shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// Command executor bound to the process-wide database
    pub executor: Executor,
}

/// Build the application router.
pub fn router(executor: Executor) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/sprint",
            post(handlers::create_sprint).get(handlers::list_sprints),
        )
        .route(
            "/sprint/{id}",
            get(handlers::get_sprint).put(handlers::update_sprint),
        )
        .route("/sprint/{id}/emit_event", post(handlers::emit_event))
        .route("/metrics/emit", post(handlers::emit_metric))
        .route("/metrics/query", post(handlers::query_metrics))
        .route("/metrics/{id}", get(handlers::get_metric))
        .route(
            "/ticket",
            post(handlers::create_ticket).get(handlers::list_tickets),
        )
        .route(
            "/ticket/{id}",
            get(handlers::get_ticket)
                .put(handlers::update_ticket)
                .delete(handlers::delete_ticket),
        )
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(AppState { executor })
}

/// Serve the router on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<F>(listener: TcpListener, executor: Executor, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(executor))
        .with_graceful_shutdown(shutdown)
        .await
}
