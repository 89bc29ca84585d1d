//! Calendar model types.
//!
//! This module provides:
//! - The event snapshot shape shared by the grid, the cache and the remote
//!   client
//! - Sunday-anchored week arithmetic
//! - The sorted agenda list

mod agenda;
mod event;
mod week;

pub use agenda::sorted_agenda;
pub use event::{CalendarEvent, EventKind};
pub use week::WeekAnchor;
