//! Sunday-anchored week arithmetic.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The first instant (Sunday 00:00 UTC) of a displayed week.
///
/// The week convention is fixed: weeks begin on Sunday. Day offsets are
/// computed in calendar days, so an event late on Monday is still day 1
/// regardless of its time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekAnchor {
    start: DateTime<Utc>,
}

impl WeekAnchor {
    /// Anchor of the week containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        let date = instant.date_naive();
        let back = date.weekday().num_days_from_sunday() as u64;
        let sunday = date - Days::new(back);
        Self {
            start: Utc.from_utc_datetime(&sunday.and_time(NaiveTime::MIN)),
        }
    }

    /// First instant of the week.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The 7 calendar days of the week, Sunday first.
    pub fn days(&self) -> [NaiveDate; 7] {
        let first = self.start.date_naive();
        std::array::from_fn(|i| first + Days::new(i as u64))
    }

    /// Difference in calendar days between `instant` and the anchor.
    ///
    /// Negative before the week, greater than 6 after it.
    pub fn day_offset(&self, instant: DateTime<Utc>) -> i64 {
        (instant.date_naive() - self.start.date_naive()).num_days()
    }

    /// Whether `instant` falls within the 7-day window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        (0..=6).contains(&self.day_offset(instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn snaps_back_to_sunday_midnight() {
        // 2024-06-05 is a Wednesday; its week starts Sunday 2024-06-02.
        let anchor = WeekAnchor::containing(at(2024, 6, 5, 15, 30));
        assert_eq!(anchor.start(), at(2024, 6, 2, 0, 0));
    }

    #[test]
    fn sunday_is_its_own_anchor() {
        let anchor = WeekAnchor::containing(at(2024, 6, 2, 23, 59));
        assert_eq!(anchor.start(), at(2024, 6, 2, 0, 0));
    }

    #[test]
    fn day_offset_uses_calendar_days() {
        let anchor = WeekAnchor::containing(at(2024, 6, 2, 0, 0));
        // Late Monday is still day 1, not day 2.
        assert_eq!(anchor.day_offset(at(2024, 6, 3, 23, 59)), 1);
        assert_eq!(anchor.day_offset(at(2024, 6, 1, 12, 0)), -1);
        assert_eq!(anchor.day_offset(at(2024, 6, 9, 0, 0)), 7);
    }

    #[test]
    fn contains_covers_exactly_seven_days() {
        let anchor = WeekAnchor::containing(at(2024, 6, 2, 0, 0));
        assert!(anchor.contains(at(2024, 6, 2, 0, 0)));
        assert!(anchor.contains(at(2024, 6, 8, 23, 59)));
        assert!(!anchor.contains(at(2024, 6, 9, 0, 0)));
        assert!(!anchor.contains(at(2024, 6, 1, 23, 59)));
    }

    #[test]
    fn days_enumerates_the_week() {
        let anchor = WeekAnchor::containing(at(2024, 6, 2, 0, 0));
        let days = anchor.days();
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 6, 8).unwrap());
    }
}
