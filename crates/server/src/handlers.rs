//! Route handlers.
//!
//! Handlers never use axum's typed JSON extractors: bodies are taken as raw
//! bytes and parsed here, so malformed JSON is answered with an
//! `IllegalPayload` envelope like every other bad input.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use ticketmaster_executor::{envelope, Command, Error, Output, Response, UnixMillis};
use tokio::task;
use tracing::error;

use crate::AppState;

/// Status code and envelope
pub type Reply = (StatusCode, Json<Response>);

/// `GET /`
pub async fn health(State(state): State<AppState>) -> String {
    match state.executor.execute(Command::Ping) {
        Ok(Output::Pong { version }) => format!("ticketmaster {} is running", version),
        _ => "ticketmaster is running".to_string(),
    }
}

/// `POST /sprint`
pub async fn create_sprint(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let window = query_time(&params, "start_time")
        .and_then(|start| Ok((start, query_time(&params, "end_time")?)));
    match window {
        Ok((start_time, end_time)) => {
            execute(
                &state,
                Command::SprintCreate {
                    start_time,
                    end_time,
                },
            )
            .await
        }
        Err(e) => rejected(e),
    }
}

/// `GET /sprint`
pub async fn list_sprints(State(state): State<AppState>) -> Reply {
    execute(&state, Command::SprintList).await
}

/// `GET /sprint/{id}`
pub async fn get_sprint(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    execute(&state, Command::SprintGet { id }).await
}

/// `POST /sprint/{id}/emit_event`
pub async fn emit_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Reply {
    match parse_body(&body) {
        Ok(event) => execute(&state, Command::SprintEmitEvent { id, event }).await,
        Err(e) => rejected(e),
    }
}

/// `PUT /sprint/{id}`
pub async fn update_sprint(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Reply {
    match parse_body(&body) {
        Ok(patch) => execute(&state, Command::SprintUpdate { id, patch }).await,
        Err(e) => rejected(e),
    }
}

/// `POST /metrics/emit`
pub async fn emit_metric(State(state): State<AppState>, body: Bytes) -> Reply {
    match parse_body(&body) {
        Ok(metric) => execute(&state, Command::MetricEmit { metric }).await,
        Err(e) => rejected(e),
    }
}

/// `GET /metrics/{id}`
pub async fn get_metric(State(state): State<AppState>, Path(event_id): Path<String>) -> Reply {
    execute(&state, Command::MetricGet { event_id }).await
}

/// `POST /metrics/query`
pub async fn query_metrics(State(state): State<AppState>, body: Bytes) -> Reply {
    match parse_body(&body) {
        Ok(query) => execute(&state, Command::MetricQuery { query }).await,
        Err(e) => rejected(e),
    }
}

/// `POST /ticket`
pub async fn create_ticket(State(state): State<AppState>, body: Bytes) -> Reply {
    match parse_body(&body) {
        Ok(ticket) => execute(&state, Command::TicketCreate { ticket }).await,
        Err(e) => rejected(e),
    }
}

/// `GET /ticket`
pub async fn list_tickets(State(state): State<AppState>) -> Reply {
    execute(&state, Command::TicketList).await
}

/// `GET /ticket/{id}`
pub async fn get_ticket(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    execute(&state, Command::TicketGet { id }).await
}

/// `PUT /ticket/{id}`
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Reply {
    match parse_body(&body) {
        Ok(ticket) => execute(&state, Command::TicketUpdate { id, ticket }).await,
        Err(e) => rejected(e),
    }
}

/// `DELETE /ticket/{id}`
pub async fn delete_ticket(State(state): State<AppState>, Path(id): Path<String>) -> Reply {
    execute(&state, Command::TicketDelete { id }).await
}

/// Run a command on the blocking pool and wrap the result.
async fn execute(state: &AppState, cmd: Command) -> Reply {
    let message = cmd.success_message();
    let name = cmd.name();
    let executor = state.executor.clone();

    let result = match task::spawn_blocking(move || executor.execute(cmd)).await {
        Ok(result) => result,
        Err(join_error) => {
            let reason = if join_error.is_panic() {
                "command panicked"
            } else {
                "command was cancelled"
            };
            Err(Error::Internal {
                reason: reason.to_string(),
            })
        }
    };

    if let Err(e @ Error::Internal { .. }) = &result {
        error!(target: "ticketmaster::server", command = name, error = %e, "Internal error");
    }

    let (status, body) = envelope(message, result);
    (status_code(status), Json(body))
}

fn rejected(error: Error) -> Reply {
    (status_code(error.status()), Json(Response::error(&error)))
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn parse_body(body: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(body).map_err(|e| Error::IllegalPayload {
        reason: format!("malformed JSON body: {}", e),
    })
}

/// Optional unix-ms query parameter; empty counts as absent.
fn query_time(params: &HashMap<String, String>, name: &str) -> Result<Option<UnixMillis>, Error> {
    match params.get(name).map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<UnixMillis>()
            .map(Some)
            .map_err(|_| Error::IllegalPayload {
                reason: format!("{}: expected integer unix milliseconds, got '{}'", name, raw),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_time() {
        let p = params(&[("start_time", "100"), ("end_time", ""), ("bad", "1.5")]);
        assert_eq!(query_time(&p, "start_time").unwrap(), Some(100));
        assert_eq!(query_time(&p, "end_time").unwrap(), None);
        assert_eq!(query_time(&p, "missing").unwrap(), None);
        assert!(matches!(
            query_time(&p, "bad").unwrap_err(),
            Error::IllegalPayload { .. }
        ));
    }

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        assert!(parse_body(b"{\"a\": 1}").is_ok());
        let err = parse_body(b"{not json").unwrap_err();
        assert_eq!(err.code(), 1000);
        assert!(parse_body(b"").is_err());
    }
}
