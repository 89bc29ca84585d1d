//! Agenda list ordering.

use super::event::CalendarEvent;

/// Sort events ascending by start time for the agenda sidebar.
///
/// The sort is stable: events sharing a start time keep their input order.
pub fn sorted_agenda(events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.start.cmp(&b.start));
    sorted
}
