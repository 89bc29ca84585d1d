//! Calendar event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendering category of a calendar event.
///
/// Affects display style only; an unavailability block carries no scheduling
/// precedence over a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Meeting,
    Unavailable,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A single event in the workspace calendar.
///
/// Events are owned by the remote store; the core treats a `Vec<CalendarEvent>`
/// as an immutable snapshot for the duration of one render pass. `end` is
/// expected to be greater than `start`, but the invariant is not enforced
/// here: the grid clamps malformed ranges instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: EventKind,
}

impl CalendarEvent {
    /// Create a new event.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: EventKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            kind,
        }
    }

    /// Get duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this event overlaps another in time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}
