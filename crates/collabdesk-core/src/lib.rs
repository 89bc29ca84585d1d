//! # Collabdesk Core Library
//!
//! This library provides the scheduling core for the Collabdesk team
//! calendar. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Grid Layout**: Pure geometry mapping a week of events onto a
//!   fixed-hour pixel grid (no I/O, no mutation)
//! - **Slot Recommendation**: Deterministic candidate meeting slots for a
//!   target day and duration
//! - **Booking Flow**: A caller-driven state machine for the two-step
//!   recommend/book dialog
//! - **Remote**: REST client for the workspace event store
//! - **Store**: Workspace-keyed local event cache behind a key-value trait
//!
//! ## Key Components
//!
//! - [`GridLayoutEngine`]: Week-view geometry engine
//! - [`SlotRecommender`]: Candidate slot engine
//! - [`BookingFlow`]: Recommend/book state machine
//! - [`RestClient`]: Remote [`EventStore`] implementation
//! - [`Config`]: Application configuration management

pub mod booking;
pub mod calendar;
pub mod config;
pub mod grid;
pub mod remote;
pub mod slots;
pub mod store;

pub use booking::{BookingFlow, BookingRequest, FlowError, FlowState, MeetingDraft};
pub use calendar::{sorted_agenda, CalendarEvent, EventKind, WeekAnchor};
pub use config::Config;
pub use grid::{EventBlock, GridConfig, GridLayoutEngine, NowMarker, WeekLayout};
pub use remote::{ApiError, EventStore, NewEvent, RestClient};
pub use slots::{recommend_slots, CandidateSlot, SlotError, SlotRank, SlotRecommender, SlotRequest};
pub use store::{EventCache, JsonFileStore, KeyValueStore, StoreError};
