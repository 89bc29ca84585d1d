use crate::calendar::CalendarEvent;

use super::types::{ApiError, NewEvent};

/// Remote store of workspace events.
///
/// Implementations are stateless between calls; each call is a single
/// request with no retry policy of its own.
pub trait EventStore {
    /// Fetch the current event snapshot.
    fn list_events(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CalendarEvent>, ApiError>> + Send;

    /// Persist a new event, returning it with its server-assigned id.
    fn create_event(
        &self,
        event: &NewEvent,
    ) -> impl std::future::Future<Output = Result<CalendarEvent, ApiError>> + Send;

    /// Remove an event. The local snapshot is left to the caller to refresh.
    fn delete_event(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
