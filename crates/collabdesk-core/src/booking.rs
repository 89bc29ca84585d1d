//! Two-step recommend/book flow.
//!
//! The flow is a caller-driven state machine. It performs no I/O: the host
//! requests recommendations, shows them, and persists the selected slot
//! through the remote store, reporting the outcome back via [`BookingFlow::complete`]
//! or [`BookingFlow::fail`].
//!
//! ## State Transitions
//!
//! ```text
//! Setup -> Recommendations -> Booking -> Closed
//!   ^            |              |
//!   +--- back ---+<--- fail ----+
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slots::{CandidateSlot, SlotError, SlotRecommender, SlotRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    Setup,
    Recommendations,
    Booking,
    Closed,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Recommendations => "recommendations",
            Self::Booking => "booking",
            Self::Closed => "closed",
        }
    }
}

/// Meeting inputs collected during the setup step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingDraft {
    pub title: String,
    /// Target day, "YYYY-MM-DD".
    pub date: String,
    pub duration_minutes: i64,
    pub attendee_ids: Vec<String>,
}

impl Default for MeetingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            duration_minutes: 30,
            attendee_ids: Vec::new(),
        }
    }
}

/// What the host sends to the remote store for the chosen slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Flow transition errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("cannot {action} while in the {state} step")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("setup incomplete: a title, a valid date and at least one attendee are required")]
    NotReady,

    #[error("no candidate slot at position {0}")]
    NoSuchSlot(usize),

    #[error("a booking request is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// The recommend/book dialog state machine.
///
/// Single-threaded and user-driven; at most one create request is in flight
/// at a time, enforced by the `Booking` state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingFlow {
    state: FlowState,
    draft: MeetingDraft,
    candidates: Vec<CandidateSlot>,
    /// Last booking failure, surfaced to the user on the recommendations step.
    error: Option<String>,
}

impl BookingFlow {
    /// Start a fresh flow in the `Setup` state.
    pub fn new() -> Self {
        Self {
            state: FlowState::Setup,
            draft: MeetingDraft::default(),
            candidates: Vec::new(),
            error: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn draft(&self) -> &MeetingDraft {
        &self.draft
    }

    pub fn candidates(&self) -> &[CandidateSlot] {
        &self.candidates
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether setup holds enough to request recommendations: a non-blank
    /// title, a date of the YYYY-MM-DD shape and at least one attendee.
    pub fn can_find(&self) -> bool {
        !self.draft.title.trim().is_empty()
            && self.draft.date.len() == 10
            && !self.draft.attendee_ids.is_empty()
    }

    // ── Setup mutators ───────────────────────────────────────────────

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.draft.date = date.into();
    }

    pub fn set_duration(&mut self, minutes: i64) {
        self.draft.duration_minutes = minutes;
    }

    /// Add the attendee if absent, remove it if present.
    pub fn toggle_attendee(&mut self, id: impl Into<String>) {
        let id = id.into();
        if let Some(pos) = self.draft.attendee_ids.iter().position(|a| *a == id) {
            self.draft.attendee_ids.remove(pos);
        } else {
            self.draft.attendee_ids.push(id);
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Validate the draft and move to `Recommendations`.
    ///
    /// On a recommender error the flow stays in `Setup` with the draft
    /// untouched.
    pub fn find_times(&mut self) -> Result<&[CandidateSlot], FlowError> {
        if self.state != FlowState::Setup {
            return Err(self.invalid("find times"));
        }
        if !self.can_find() {
            return Err(FlowError::NotReady);
        }
        let request = SlotRequest {
            date: self.draft.date.clone(),
            duration_minutes: self.draft.duration_minutes,
            attendee_ids: self.draft.attendee_ids.clone(),
        };
        self.candidates = SlotRecommender::new().recommend(&request)?;
        self.state = FlowState::Recommendations;
        self.error = None;
        Ok(&self.candidates)
    }

    /// Return to `Setup`, keeping every input. Candidates are discarded and
    /// recomputed on the next `find_times`.
    pub fn back(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Recommendations {
            return Err(self.invalid("go back"));
        }
        self.candidates.clear();
        self.error = None;
        self.state = FlowState::Setup;
        Ok(())
    }

    /// Choose the candidate at `index` and enter `Booking`.
    ///
    /// Returns the request for the host to persist. A second selection while
    /// one request is in flight is rejected.
    pub fn select(&mut self, index: usize) -> Result<BookingRequest, FlowError> {
        match self.state {
            FlowState::Booking => Err(FlowError::SubmissionInFlight),
            FlowState::Recommendations => {
                let slot = self
                    .candidates
                    .get(index)
                    .ok_or(FlowError::NoSuchSlot(index))?;
                let request = BookingRequest {
                    title: self.draft.title.trim().to_string(),
                    description: format!("Meeting with {}", self.draft.attendee_ids.join(", ")),
                    start: slot.start,
                    end: slot.end,
                };
                self.state = FlowState::Booking;
                Ok(request)
            }
            _ => Err(self.invalid("select a slot")),
        }
    }

    /// The create call resolved: close the dialog and reset the draft.
    pub fn complete(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Booking {
            return Err(self.invalid("complete"));
        }
        *self = Self::new();
        self.state = FlowState::Closed;
        Ok(())
    }

    /// The create call failed: return to `Recommendations` with the error
    /// surfaced and the candidate list untouched.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        if self.state != FlowState::Booking {
            return Err(self.invalid("report a failure"));
        }
        self.error = Some(message.into());
        self.state = FlowState::Recommendations;
        Ok(())
    }

    /// Dismiss the flow from any non-terminal state.
    pub fn cancel(&mut self) {
        if self.state != FlowState::Closed {
            self.candidates.clear();
            self.state = FlowState::Closed;
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            state: self.state.as_str(),
            action,
        }
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotRank;

    fn ready_flow() -> BookingFlow {
        let mut flow = BookingFlow::new();
        flow.set_title("Team Sync");
        flow.set_date("2024-06-10");
        flow.set_duration(30);
        flow.toggle_attendee("alex");
        flow.toggle_attendee("sarah");
        flow
    }

    #[test]
    fn setup_gating() {
        let mut flow = BookingFlow::new();
        assert!(!flow.can_find());
        assert_eq!(flow.find_times().unwrap_err(), FlowError::NotReady);

        flow.set_title("   ");
        flow.set_date("2024-06-10");
        flow.toggle_attendee("alex");
        assert!(!flow.can_find()); // blank title

        flow.set_title("Team Sync");
        assert!(flow.can_find());
    }

    #[test]
    fn toggle_attendee_adds_and_removes() {
        let mut flow = BookingFlow::new();
        flow.toggle_attendee("alex");
        flow.toggle_attendee("sarah");
        flow.toggle_attendee("alex");
        assert_eq!(flow.draft().attendee_ids, vec!["sarah".to_string()]);
    }

    #[test]
    fn find_times_moves_to_recommendations() {
        let mut flow = ready_flow();
        let slots = flow.find_times().unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].rank, SlotRank::Best);
        assert_eq!(flow.state(), FlowState::Recommendations);
    }

    #[test]
    fn invalid_date_keeps_the_flow_in_setup() {
        let mut flow = ready_flow();
        flow.set_date("2024-02-30");
        assert!(matches!(
            flow.find_times(),
            Err(FlowError::Slot(SlotError::InvalidDate(_)))
        ));
        assert_eq!(flow.state(), FlowState::Setup);
        assert_eq!(flow.draft().title, "Team Sync");
    }

    #[test]
    fn back_preserves_inputs_and_discards_candidates() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        flow.back().unwrap();

        assert_eq!(flow.state(), FlowState::Setup);
        assert!(flow.candidates().is_empty());
        assert_eq!(flow.draft().title, "Team Sync");
        assert_eq!(flow.draft().date, "2024-06-10");
        assert_eq!(flow.draft().attendee_ids.len(), 2);
    }

    #[test]
    fn select_builds_the_booking_request() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        let request = flow.select(1).unwrap();

        assert_eq!(flow.state(), FlowState::Booking);
        assert_eq!(request.title, "Team Sync");
        assert_eq!(request.description, "Meeting with alex, sarah");
        assert_eq!(request.start.format("%H:%M").to_string(), "11:00");
        assert_eq!((request.end - request.start).num_minutes(), 30);
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        assert_eq!(flow.select(3).unwrap_err(), FlowError::NoSuchSlot(3));
        assert_eq!(flow.state(), FlowState::Recommendations);
    }

    #[test]
    fn second_submission_is_guarded() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        flow.select(0).unwrap();
        assert_eq!(flow.select(1).unwrap_err(), FlowError::SubmissionInFlight);
    }

    #[test]
    fn completion_resets_the_draft() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        flow.select(0).unwrap();
        flow.complete().unwrap();

        assert_eq!(flow.state(), FlowState::Closed);
        assert!(flow.draft().title.is_empty());
        assert!(flow.candidates().is_empty());
    }

    #[test]
    fn failure_returns_to_recommendations_with_candidates_intact() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        let before = flow.candidates().to_vec();
        flow.select(2).unwrap();
        flow.fail("server rejected the event").unwrap();

        assert_eq!(flow.state(), FlowState::Recommendations);
        assert_eq!(flow.last_error(), Some("server rejected the event"));
        assert_eq!(flow.candidates(), before.as_slice());

        // A retry is a fresh user-initiated selection.
        assert!(flow.select(0).is_ok());
    }

    #[test]
    fn cancel_discards_candidates() {
        let mut flow = ready_flow();
        flow.find_times().unwrap();
        flow.cancel();
        assert_eq!(flow.state(), FlowState::Closed);
        assert!(flow.candidates().is_empty());
    }
}
