//! Sprint command handlers.
//!
//! This module implements handlers for the 5 sprint commands by
//! dispatching directly to `SprintManager` via `bridge::Primitives`.

use serde_json::Value;
use ticketmaster_core::UnixMillis;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle SprintCreate command.
pub fn sprint_create(
    p: &Primitives,
    start_time: Option<UnixMillis>,
    end_time: Option<UnixMillis>,
) -> Result<Output> {
    let sprint = convert_result(p.sprints.create(start_time, end_time))?;
    Ok(Output::Sprint(sprint))
}

/// Handle SprintList command.
pub fn sprint_list(p: &Primitives) -> Result<Output> {
    let sprints = convert_result(p.sprints.list())?;
    Ok(Output::Sprints(sprints))
}

/// Handle SprintGet command.
pub fn sprint_get(p: &Primitives, id: String) -> Result<Output> {
    let sprint = convert_result(p.sprints.get(&id))?;
    Ok(Output::Sprint(sprint))
}

/// Handle SprintEmitEvent command.
pub fn sprint_emit_event(p: &Primitives, id: String, event: Value) -> Result<Output> {
    let sprint = convert_result(p.sprints.append_event(&id, &event))?;
    Ok(Output::Sprint(sprint))
}

/// Handle SprintUpdate command.
pub fn sprint_update(p: &Primitives, id: String, patch: Value) -> Result<Output> {
    let sprint = convert_result(p.sprints.update(&id, &patch))?;
    Ok(Output::Sprint(sprint))
}
