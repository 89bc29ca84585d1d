//! Wire types for the workspace event API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{CalendarEvent, EventKind};

/// Event category on the wire. The backend stores unavailability blocks as
/// GROUP events; everything else arrives as INDIVIDUAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireEventType {
    Individual,
    Group,
}

/// An event record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_type: WireEventType,
    #[serde(default)]
    pub location: String,
    pub created_by: i64,
    pub workspace_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    /// Map the wire record into the calendar model.
    pub fn into_event(self) -> CalendarEvent {
        let kind = match self.event_type {
            WireEventType::Group => EventKind::Unavailable,
            WireEventType::Individual => EventKind::Meeting,
        };
        CalendarEvent::new(self.event_id, self.title, self.start_time, self.end_time, kind)
    }
}

/// A new event as assembled by the core, before it has a server id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: EventKind,
    pub workspace_id: String,
}

/// Create-request body for `POST /api/events/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventPayload {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_type: WireEventType,
    pub location: String,
    pub created_by: i64,
    pub workspace_id: String,
}

impl CreateEventPayload {
    pub fn from_new_event(event: &NewEvent, created_by: i64) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: event.start,
            end_time: event.end,
            event_type: match event.kind {
                EventKind::Unavailable => WireEventType::Group,
                EventKind::Meeting => WireEventType::Individual,
            },
            location: "none".to_string(),
            created_by,
            workspace_id: event.workspace_id.clone(),
        }
    }
}

/// Remote store error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}
