//! MetricQueryEngine: metric emission and range queries
//!
//! Metric events are flat documents in the `metrics` collection, written
//! once and never mutated. Lookups go by the caller-supplied `event_id`, not
//! by the store-generated document id.
//!
//! ## Queries
//!
//! A query becomes a conjunctive store filter:
//!
//! | Query field | Predicate |
//! |-------------|-----------|
//! | `start`, `end` | `start <= timestamp <= end` |
//! | `ticket_status: "open"` | `ticket_status == "open"` |
//! | `ticket_status: ["open", "done"]` | `ticket_status in {"open", "done"}` |
//!
//! `start > end` is not rejected; the range simply matches nothing.
//! Results come back in store order.

use serde_json::Value;
use ticketmaster_core::{parse, Error, MetricEvent, MetricQuery, Result, StatusFilter};
use ticketmaster_storage::document::{from_document, to_document, Document};
use ticketmaster_storage::Filter;
use tracing::{debug, info};

use crate::database::Database;

/// Collection holding metric event documents
pub const METRICS_COLLECTION: &str = "metrics";

const EVENT_ID_FIELD: &str = "event_id";
const TIMESTAMP_FIELD: &str = "timestamp";
const TICKET_STATUS_FIELD: &str = "ticket_status";

/// Metric emission and query component
///
/// Stateless facade over Database; all state lives in the store.
#[derive(Clone, Debug)]
pub struct MetricQueryEngine {
    db: Database,
}

impl MetricQueryEngine {
    /// Create a new MetricQueryEngine
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate `payload` as a [`MetricEvent`] and store it.
    ///
    /// Returns the validated event unchanged.
    ///
    /// # Errors
    ///
    /// - `IllegalPayload` on shape violation (nothing is written)
    /// - `StoreUnavailable` if the insert is not acknowledged
    pub fn emit(&self, payload: &Value) -> Result<MetricEvent> {
        let event: MetricEvent = parse(payload)?;
        self.record(event)
    }

    /// Store an already validated metric event.
    ///
    /// No duplicate detection is performed; emitting the same `event_id`
    /// twice stores two documents.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the insert is not acknowledged.
    pub fn record(&self, event: MetricEvent) -> Result<MetricEvent> {
        let document = to_document(&event)
            .map_err(|e| Error::internal(format!("metric event does not encode: {}", e)))?;
        let id = self.db.store().insert(METRICS_COLLECTION, document)?;

        info!(
            target: "ticketmaster::metrics",
            document_id = %id,
            event_id = %event.event_id,
            ticket_id = %event.ticket_id,
            "Emitted metric"
        );
        Ok(event)
    }

    /// Fetch a metric event by its `event_id`.
    ///
    /// Event ids are not unique. When several events share the id, which one
    /// comes back is unspecified, since store iteration order is arbitrary.
    ///
    /// # Errors
    ///
    /// `MetricsNotFound` if no event has this id.
    pub fn get_by_id(&self, event_id: &str) -> Result<MetricEvent> {
        let filter = Filter::all().eq(EVENT_ID_FIELD, event_id);
        match self
            .db
            .store()
            .find(METRICS_COLLECTION, &filter)?
            .into_iter()
            .next()
        {
            Some((_, document)) => decode(document),
            None => Err(Error::metrics_not_found(event_id)),
        }
    }

    /// Validate `payload` as a [`MetricQuery`] and run it.
    ///
    /// # Errors
    ///
    /// `IllegalPayload` if the payload does not match the query shape.
    pub fn query(&self, payload: &Value) -> Result<Vec<MetricEvent>> {
        let query: MetricQuery = parse(payload)?;
        self.search(&query)
    }

    /// Run an already validated query.
    pub fn search(&self, query: &MetricQuery) -> Result<Vec<MetricEvent>> {
        let filter = filter_for(query);
        let results = self
            .db
            .store()
            .find(METRICS_COLLECTION, &filter)?
            .into_iter()
            .map(|(_, document)| decode(document))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            target: "ticketmaster::metrics",
            start = query.start,
            end = query.end,
            hits = results.len(),
            "Ran metric query"
        );
        Ok(results)
    }
}

/// Build the store filter for a metric query.
pub fn filter_for(query: &MetricQuery) -> Filter {
    let filter = Filter::all().between(TIMESTAMP_FIELD, query.start, query.end);
    match &query.ticket_status {
        None => filter,
        Some(StatusFilter::One(status)) => filter.eq(TICKET_STATUS_FIELD, status.as_str()),
        Some(StatusFilter::Many(statuses)) => {
            filter.one_of(TICKET_STATUS_FIELD, statuses.iter().map(|s| s.as_str()))
        }
    }
}

fn decode(document: Document) -> Result<MetricEvent> {
    from_document(document)
        .map_err(|e| Error::internal(format!("metric event does not decode: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ticketmaster_core::TicketStatus;
    use ticketmaster_storage::Predicate;

    fn setup() -> MetricQueryEngine {
        Database::in_memory().metrics()
    }

    fn metric_payload(event_id: &str, timestamp: i64, status: &str) -> Value {
        json!({
            "event_id": event_id,
            "timestamp": timestamp,
            "event_detail": "cycle_time",
            "event_value": 7,
            "ticket_id": "t1",
            "ticket_status": status
        })
    }

    fn event_ids(events: &[MetricEvent]) -> Vec<&str> {
        let mut ids: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    // ========================================
    // emit / get_by_id
    // ========================================

    #[test]
    fn test_emit_returns_event_unchanged() {
        let metrics = setup();
        let payload = metric_payload("e1", 100, "open");
        let event = metrics.emit(&payload).unwrap();
        assert_eq!(serde_json::to_value(&event).unwrap(), payload);
    }

    #[test]
    fn test_emit_then_get_round_trips() {
        let metrics = setup();
        let emitted = metrics.emit(&metric_payload("e1", 100, "done")).unwrap();
        assert_eq!(metrics.get_by_id("e1").unwrap(), emitted);
    }

    #[test]
    fn test_emit_rejects_bad_status_without_writing() {
        let metrics = setup();
        let err = metrics
            .emit(&metric_payload("e1", 100, "archived"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            metrics.get_by_id("e1").unwrap_err(),
            Error::MetricsNotFound { .. }
        ));
    }

    #[test]
    fn test_get_missing_metric() {
        let err = setup().get_by_id("nope").unwrap_err();
        assert!(matches!(err, Error::MetricsNotFound { ref id } if id == "nope"));
    }

    #[test]
    fn test_duplicate_event_ids_are_both_stored() {
        let metrics = setup();
        metrics.emit(&metric_payload("dup", 1, "open")).unwrap();
        metrics.emit(&metric_payload("dup", 2, "open")).unwrap();
        let all = metrics
            .query(&json!({"start": 0, "end": 10}))
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(metrics.get_by_id("dup").unwrap().event_id, "dup");
    }

    // ========================================
    // query
    // ========================================

    #[test]
    fn test_query_range_is_inclusive() {
        let metrics = setup();
        for (id, ts) in [("a", 99), ("b", 100), ("c", 150), ("d", 200), ("e", 201)] {
            metrics.emit(&metric_payload(id, ts, "open")).unwrap();
        }
        let hits = metrics.query(&json!({"start": 100, "end": 200})).unwrap();
        assert_eq!(event_ids(&hits), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_query_single_status() {
        let metrics = setup();
        metrics.emit(&metric_payload("a", 10, "open")).unwrap();
        metrics.emit(&metric_payload("b", 20, "done")).unwrap();
        let hits = metrics
            .query(&json!({"start": 0, "end": 100, "ticket_status": "done"}))
            .unwrap();
        assert_eq!(event_ids(&hits), vec!["b"]);
    }

    #[test]
    fn test_query_status_list() {
        let metrics = setup();
        metrics.emit(&metric_payload("a", 10, "open")).unwrap();
        metrics.emit(&metric_payload("b", 20, "in_progress")).unwrap();
        metrics.emit(&metric_payload("c", 30, "done")).unwrap();
        let hits = metrics
            .query(&json!({"start": 0, "end": 100, "ticket_status": ["open", "done"]}))
            .unwrap();
        assert_eq!(event_ids(&hits), vec!["a", "c"]);
    }

    #[test]
    fn test_query_inverted_range_is_empty_not_error() {
        let metrics = setup();
        metrics.emit(&metric_payload("a", 150, "open")).unwrap();
        let hits = metrics.query(&json!({"start": 200, "end": 100})).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_query_rejects_bad_status_in_list() {
        let err = setup()
            .query(&json!({"start": 0, "end": 1, "ticket_status": ["open", "lost"]}))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_query_requires_bounds() {
        let err = setup().query(&json!({"start": 0})).unwrap_err();
        assert!(err.is_validation());
    }

    // ========================================
    // filter_for
    // ========================================

    #[test]
    fn test_filter_without_status_has_only_range() {
        let filter = filter_for(&MetricQuery {
            start: 1,
            end: 2,
            ticket_status: None,
        });
        assert_eq!(filter.predicates().len(), 1);
        assert_eq!(filter.predicates()[0].0, TIMESTAMP_FIELD);
    }

    #[test]
    fn test_filter_for_status_list_uses_membership() {
        let filter = filter_for(&MetricQuery {
            start: 1,
            end: 2,
            ticket_status: Some(StatusFilter::Many(vec![TicketStatus::Open])),
        });
        let (field, predicate) = &filter.predicates()[1];
        assert_eq!(field, TICKET_STATUS_FIELD);
        assert_eq!(predicate, &Predicate::In(vec![json!("open")]));
    }
}
