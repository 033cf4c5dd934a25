//! Core types for Ticketmaster
//!
//! This module defines the foundational types:
//! - DocumentId: Identifier assigned by the document store on insert
//! - UnixMillis: Timestamp representation (milliseconds since the epoch)
//! - TicketStatus: Closed set of ticket workflow states
//! - TicketPriority: Closed set of ticket priorities
//! - TicketType: Closed set of ticket kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Milliseconds since the unix epoch.
pub type UnixMillis = i64;

/// Current wall-clock time in unix milliseconds.
pub fn now_millis() -> UnixMillis {
    chrono::Utc::now().timestamp_millis()
}

/// Identifier of a persisted document
///
/// Generated by the document store on insert. Callers treat it as an opaque
/// string: any string is a syntactically valid id, unknown ids simply do not
/// resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh random id (UUID v4, simple hex form)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Workflow state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Not started
    Open,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
}

impl TicketStatus {
    /// Wire names of every status, in declaration order
    pub const NAMES: &'static [&'static str] = &["open", "in_progress", "done"];

    /// All statuses, in declaration order
    pub const ALL: [TicketStatus; 3] = [Self::Open, Self::InProgress, Self::Done];

    /// Wire name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown ticket status '{}'", s))
    }
}

/// Priority of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl TicketPriority {
    /// Wire names of every priority, in declaration order
    pub const NAMES: &'static [&'static str] = &["low", "medium", "high"];

    /// All priorities, in declaration order
    pub const ALL: [TicketPriority; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire name of this priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| format!("unknown ticket priority '{}'", s))
    }
}

/// Kind of work a ticket tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    /// Defect
    Bug,
    /// New functionality
    Feature,
    /// Anything else
    Task,
}

impl TicketType {
    /// Wire names of every type, in declaration order
    pub const NAMES: &'static [&'static str] = &["bug", "feature", "task"];

    /// All types, in declaration order
    pub const ALL: [TicketType; 3] = [Self::Bug, Self::Feature, Self::Task];

    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
