//! Remote workspace event store.
//!
//! The surrounding application persists events through a REST/JSON
//! collaborator. This module holds the trait seam the core consumes, the
//! wire records of that collaborator, and a reqwest-backed client. Failures
//! surface to the caller as-is: the core never retries (at-most-once, with
//! user-initiated retry only).

mod rest_client;
mod traits;
mod types;

pub use rest_client::RestClient;
pub use traits::EventStore;
pub use types::{ApiError, CreateEventPayload, EventRecord, NewEvent, WireEventType};
