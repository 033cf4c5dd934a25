//! Ticket command handlers.

use serde_json::Value;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle TicketCreate command.
pub fn ticket_create(p: &Primitives, ticket: Value) -> Result<Output> {
    let ticket = convert_result(p.tickets.create(&ticket))?;
    Ok(Output::Ticket(ticket))
}

/// Handle TicketList command.
pub fn ticket_list(p: &Primitives) -> Result<Output> {
    let tickets = convert_result(p.tickets.list())?;
    Ok(Output::Tickets(tickets))
}

/// Handle TicketGet command.
pub fn ticket_get(p: &Primitives, id: String) -> Result<Output> {
    let ticket = convert_result(p.tickets.get(&id))?;
    Ok(Output::Ticket(ticket))
}

/// Handle TicketUpdate command.
pub fn ticket_update(p: &Primitives, id: String, ticket: Value) -> Result<Output> {
    let ticket = convert_result(p.tickets.update(&id, &ticket))?;
    Ok(Output::Ticket(ticket))
}

/// Handle TicketDelete command.
///
/// Deleting an unknown ticket succeeds.
pub fn ticket_delete(p: &Primitives, id: String) -> Result<Output> {
    convert_result(p.tickets.delete(&id))?;
    Ok(Output::Unit)
}
