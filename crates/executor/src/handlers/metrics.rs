//! Metric command handlers.

use serde_json::Value;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle MetricEmit command.
pub fn metric_emit(p: &Primitives, metric: Value) -> Result<Output> {
    let event = convert_result(p.metrics.emit(&metric))?;
    Ok(Output::Metric(event))
}

/// Handle MetricGet command.
pub fn metric_get(p: &Primitives, event_id: String) -> Result<Output> {
    let event = convert_result(p.metrics.get_by_id(&event_id))?;
    Ok(Output::Metric(event))
}

/// Handle MetricQuery command.
pub fn metric_query(p: &Primitives, query: Value) -> Result<Output> {
    let events = convert_result(p.metrics.query(&query))?;
    Ok(Output::Metrics(events))
}
