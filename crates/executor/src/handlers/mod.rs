//! Command handlers organized by engine component.
//!
//! | Module | Commands | Component |
//! |--------|----------|-----------|
//! | `sprint` | 5 | SprintManager |
//! | `metrics` | 3 | MetricQueryEngine |
//! | `ticket` | 5 | TicketStore |

pub mod metrics;
pub mod sprint;
pub mod ticket;
