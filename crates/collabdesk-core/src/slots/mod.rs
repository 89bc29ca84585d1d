//! Candidate slot recommendation.
//!
//! Proposes meeting slots for a target day and duration. The ranking is
//! strictly positional over three canonical start times; it is deterministic
//! and consults no availability data. Extending this into a conflict-aware
//! scheduler is a separate feature, not a property of this engine.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical slot start hours of the target day, in rank order.
const CANONICAL_HOURS: [u32; 3] = [9, 11, 14];

/// Positional rank of a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRank {
    Best,
    Good,
    Alternative,
}

impl SlotRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Best => "Best",
            Self::Good => "Good",
            Self::Alternative => "Alternative",
        }
    }
}

/// A proposed meeting window.
///
/// Times are wall-clock values of the target day; the host converts them to
/// instants when persisting. Candidates are ephemeral: built fresh per
/// request and discarded once the flow closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub rank: SlotRank,
}

impl CandidateSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Inputs for one recommendation request.
///
/// `attendee_ids` must be non-empty before the booking flow will request
/// recommendations; the ranking itself never consults it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRequest {
    /// Target calendar day, "YYYY-MM-DD".
    pub date: String,
    pub duration_minutes: i64,
    pub attendee_ids: Vec<String>,
}

/// Recommendation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotError {
    #[error("invalid date '{0}': expected a real calendar day as YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid duration {0}: must be a positive number of minutes")]
    InvalidDuration(i64),
}

/// Fixed-heuristic slot recommendation engine.
pub struct SlotRecommender;

impl SlotRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Produce exactly three candidates for the request.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidDate`] when the date string is not a real
    /// calendar day and [`SlotError::InvalidDuration`] for non-positive
    /// durations. Existing events are not consulted.
    pub fn recommend(&self, request: &SlotRequest) -> Result<Vec<CandidateSlot>, SlotError> {
        let day = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
            .map_err(|_| SlotError::InvalidDate(request.date.clone()))?;
        if request.duration_minutes <= 0 {
            return Err(SlotError::InvalidDuration(request.duration_minutes));
        }
        Ok(self.slots_for_day(day, request.duration_minutes))
    }

    /// Candidates for an already-parsed day.
    pub fn slots_for_day(&self, day: NaiveDate, duration_minutes: i64) -> Vec<CandidateSlot> {
        let ranks = [SlotRank::Best, SlotRank::Good, SlotRank::Alternative];
        CANONICAL_HOURS
            .iter()
            .zip(ranks)
            .map(|(&hour, rank)| {
                let start =
                    day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));
                CandidateSlot {
                    start,
                    end: start + Duration::minutes(duration_minutes),
                    rank,
                }
            })
            .collect()
    }
}

impl Default for SlotRecommender {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function using a default engine.
pub fn recommend_slots(request: &SlotRequest) -> Result<Vec<CandidateSlot>, SlotError> {
    SlotRecommender::new().recommend(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: &str, duration: i64) -> SlotRequest {
        SlotRequest {
            date: date.to_string(),
            duration_minutes: duration,
            attendee_ids: vec!["alex".to_string()],
        }
    }

    fn hm(slot: &CandidateSlot) -> String {
        slot.start.format("%H:%M").to_string()
    }

    #[test]
    fn returns_three_ranked_candidates() {
        let slots = recommend_slots(&request("2024-06-10", 30)).unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].rank, SlotRank::Best);
        assert_eq!(slots[1].rank, SlotRank::Good);
        assert_eq!(slots[2].rank, SlotRank::Alternative);
    }

    #[test]
    fn forty_five_minute_meeting_on_a_monday() {
        // date 2024-06-10, 45 minutes => 09:00-09:45, 11:00-11:45, 14:00-14:45.
        let slots = recommend_slots(&request("2024-06-10", 45)).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        assert_eq!(hm(&slots[0]), "09:00");
        assert_eq!(hm(&slots[1]), "11:00");
        assert_eq!(hm(&slots[2]), "14:00");
        for slot in &slots {
            assert_eq!(slot.start.date(), day);
            assert_eq!(slot.duration_minutes(), 45);
        }
    }

    #[test]
    fn duration_is_applied_verbatim() {
        let slots = recommend_slots(&request("2024-06-10", 90)).unwrap();
        assert_eq!(slots[0].end.format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn rejects_impossible_calendar_days() {
        let err = recommend_slots(&request("2024-02-30", 30)).unwrap_err();
        assert!(matches!(err, SlotError::InvalidDate(_)));
    }

    #[test]
    fn rejects_malformed_date_strings() {
        for date in ["", "next tuesday", "2024/06/10", "06-10-2024"] {
            assert!(matches!(
                recommend_slots(&request(date, 30)),
                Err(SlotError::InvalidDate(_))
            ));
        }
    }

    #[test]
    fn leap_day_is_a_valid_target() {
        let slots = recommend_slots(&request("2024-02-29", 15)).unwrap();
        assert_eq!(slots[0].start.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn rejects_non_positive_durations() {
        assert!(matches!(
            recommend_slots(&request("2024-06-10", 0)),
            Err(SlotError::InvalidDuration(0))
        ));
        assert!(matches!(
            recommend_slots(&request("2024-06-10", -15)),
            Err(SlotError::InvalidDuration(-15))
        ));
    }

    #[test]
    fn identical_requests_yield_identical_candidates() {
        let a = recommend_slots(&request("2024-06-10", 60)).unwrap();
        let b = recommend_slots(&request("2024-06-10", 60)).unwrap();
        assert_eq!(a, b);
    }
}
