//! Event placement on the hour grid.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarEvent, EventKind, WeekAnchor};

/// Grid columns: one hour gutter plus seven day columns.
pub const GRID_COLUMNS: usize = 8;

/// Width of one grid column as a percentage of the full grid.
pub const DAY_COLUMN_PCT: f32 = 100.0 / GRID_COLUMNS as f32;

/// Horizontal inset applied to both edges of every block, in rem.
pub const BLOCK_INSET_REM: f32 = 0.25;

/// Minimum block height. Keeps zero-duration and very short events visible
/// and clickable.
pub const MIN_BLOCK_HEIGHT_PX: f32 = 16.0;

/// Display window and vertical scale of the hour grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// First displayed hour (inclusive).
    pub hour_start: u32,
    /// Last displayed hour (exclusive).
    pub hour_end: u32,
    /// Vertical pixels per hour row.
    pub px_per_hour: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hour_start: 6,
            hour_end: 21,
            px_per_hour: 64.0,
        }
    }
}

impl GridConfig {
    /// Number of one-hour rows in the display window.
    pub fn hour_rows(&self) -> u32 {
        self.hour_end.saturating_sub(self.hour_start)
    }

    /// Total grid height in pixels.
    pub fn grid_height(&self) -> f32 {
        self.hour_rows() as f32 * self.px_per_hour
    }

    /// Gutter labels for each displayed hour ("6 AM" .. "8 PM").
    pub fn hour_labels(&self) -> Vec<String> {
        (self.hour_start..self.hour_end)
            .map(|h| match h {
                0 => "12 AM".to_string(),
                1..=11 => format!("{h} AM"),
                12 => "12 PM".to_string(),
                _ => format!("{} PM", h - 12),
            })
            .collect()
    }
}

/// Absolute placement of one event on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBlock {
    pub event_id: String,
    pub title: String,
    pub kind: EventKind,
    /// Day column, 0 = Sunday .. 6 = Saturday.
    pub day_index: usize,
    /// Pixels from the top of the grid body. Negative when the event starts
    /// before the display window; such blocks render clipped.
    pub top: f32,
    pub height: f32,
    /// Left edge as a percentage of the grid width (before the rem inset).
    pub left_pct: f32,
    pub width_pct: f32,
}

/// Position of the current-time indicator line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowMarker {
    pub day_index: usize,
    pub top: f32,
    pub left_pct: f32,
    pub right_pct: f32,
}

/// One computed render pass over a week of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLayout {
    pub blocks: Vec<EventBlock>,
    pub now: Option<NowMarker>,
}

/// Deterministic mapping from (week, events, now) to grid placements.
pub struct GridLayoutEngine {
    config: GridConfig,
}

impl GridLayoutEngine {
    /// Create an engine with the default display window (06:00-21:00, 64 px/h).
    pub fn new() -> Self {
        Self {
            config: GridConfig::default(),
        }
    }

    /// Create with a custom display window.
    pub fn with_config(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Lay out one week of events.
    ///
    /// Events whose start falls outside the 7-day window are dropped, as are
    /// events lying entirely outside the hour window; neither is an error.
    /// A malformed range (`end <= start`) yields a block clamped to the
    /// minimum height rather than a failure. Overlapping same-day events are
    /// not split into lanes; their blocks stack.
    pub fn layout(
        &self,
        week: &WeekAnchor,
        events: &[CalendarEvent],
        now: DateTime<Utc>,
    ) -> WeekLayout {
        let rows = self.config.hour_rows() as f32;
        let blocks = events
            .iter()
            .filter_map(|event| {
                let day = week.day_offset(event.start);
                if !(0..=6).contains(&day) {
                    return None;
                }
                let start_frac = hour_of_day(event.start) - self.config.hour_start as f32;
                let end_frac = hour_of_day(event.end) - self.config.hour_start as f32;
                if start_frac.max(end_frac) <= 0.0 || start_frac.min(end_frac) >= rows {
                    return None;
                }
                Some(EventBlock {
                    event_id: event.id.clone(),
                    title: event.title.clone(),
                    kind: event.kind,
                    day_index: day as usize,
                    top: start_frac * self.config.px_per_hour,
                    height: MIN_BLOCK_HEIGHT_PX
                        .max((end_frac - start_frac) * self.config.px_per_hour),
                    left_pct: (day as f32 + 1.0) * DAY_COLUMN_PCT,
                    width_pct: DAY_COLUMN_PCT - 0.5,
                })
            })
            .collect();

        WeekLayout {
            blocks,
            now: self.now_marker(week, now),
        }
    }

    /// Current-time indicator, emitted only when `now` falls in the displayed
    /// week and above the window's lower edge.
    fn now_marker(&self, week: &WeekAnchor, now: DateTime<Utc>) -> Option<NowMarker> {
        let day = week.day_offset(now);
        if !(0..=6).contains(&day) {
            return None;
        }
        let top = (hour_of_day(now) - self.config.hour_start as f32) * self.config.px_per_hour;
        if top < 0.0 {
            return None;
        }
        Some(NowMarker {
            day_index: day as usize,
            top,
            left_pct: (day as f32 + 1.0) * DAY_COLUMN_PCT,
            right_pct: (7 - day) as f32 * DAY_COLUMN_PCT,
        })
    }
}

impl Default for GridLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Hour of day with fractional minutes (seconds ignored).
fn hour_of_day(instant: DateTime<Utc>) -> f32 {
    instant.hour() as f32 + instant.minute() as f32 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap()
    }

    fn week() -> WeekAnchor {
        // Sunday 2024-06-02T00:00.
        WeekAnchor::containing(at(2, 0, 0))
    }

    fn meeting(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent::new(id, "Sync", start, end, EventKind::Meeting)
    }

    #[test]
    fn monday_morning_meeting_placement() {
        // weekAnchor = Sunday 2024-06-02T00:00, event Mon 09:00-10:30,
        // hour window from 06:00 at 64 px/h.
        let engine = GridLayoutEngine::new();
        let events = vec![meeting("1", at(3, 9, 0), at(3, 10, 30))];
        let layout = engine.layout(&week(), &events, at(1, 0, 0));

        assert_eq!(layout.blocks.len(), 1);
        let block = &layout.blocks[0];
        assert_eq!(block.day_index, 1);
        assert_eq!(block.top, 192.0); // (9 - 6) * 64
        assert_eq!(block.height, 96.0); // 1.5 * 64
    }

    #[test]
    fn horizontal_placement_uses_eight_columns() {
        let engine = GridLayoutEngine::new();
        let events = vec![meeting("1", at(2, 9, 0), at(2, 10, 0))];
        let layout = engine.layout(&week(), &events, at(1, 0, 0));

        let block = &layout.blocks[0];
        assert_eq!(block.day_index, 0);
        assert_eq!(block.left_pct, 12.5); // (0 + 1) * 100/8
        assert_eq!(block.width_pct, 12.0);
    }

    #[test]
    fn height_floor_applies_to_degenerate_ranges() {
        let engine = GridLayoutEngine::new();
        let events = vec![
            meeting("zero", at(3, 9, 0), at(3, 9, 0)),
            meeting("inverted", at(4, 10, 0), at(4, 9, 0)),
            meeting("short", at(5, 9, 0), at(5, 9, 5)),
        ];
        let layout = engine.layout(&week(), &events, at(1, 0, 0));

        assert_eq!(layout.blocks.len(), 3);
        for block in &layout.blocks {
            assert_eq!(block.height, 16.0);
        }
        // The inverted range still anchors at its start hour.
        assert_eq!(layout.blocks[1].top, 256.0);
    }

    #[test]
    fn events_outside_the_week_are_dropped() {
        let engine = GridLayoutEngine::new();
        let events = vec![
            meeting("before", at(1, 9, 0), at(1, 10, 0)),
            meeting("in", at(8, 9, 0), at(8, 10, 0)), // Saturday, day 6
            meeting("after", at(9, 9, 0), at(9, 10, 0)),
        ];
        let layout = engine.layout(&week(), &events, at(1, 0, 0));

        assert_eq!(layout.blocks.len(), 1);
        assert_eq!(layout.blocks[0].event_id, "in");
        assert_eq!(layout.blocks[0].day_index, 6);
    }

    #[test]
    fn events_entirely_outside_the_hour_window_do_not_render() {
        let engine = GridLayoutEngine::new();
        let events = vec![
            meeting("early", at(3, 4, 0), at(3, 5, 30)),
            meeting("late", at(3, 22, 0), at(3, 23, 0)),
        ];
        let layout = engine.layout(&week(), &events, at(1, 0, 0));
        assert!(layout.blocks.is_empty());
    }

    #[test]
    fn window_straddling_event_renders_with_negative_top() {
        let engine = GridLayoutEngine::new();
        let events = vec![meeting("dawn", at(3, 5, 0), at(3, 7, 0))];
        let layout = engine.layout(&week(), &events, at(1, 0, 0));

        assert_eq!(layout.blocks.len(), 1);
        assert_eq!(layout.blocks[0].top, -64.0);
        assert_eq!(layout.blocks[0].height, 128.0);
    }

    #[test]
    fn now_marker_inside_the_week() {
        let engine = GridLayoutEngine::new();
        let layout = engine.layout(&week(), &[], at(4, 10, 30));

        let now = layout.now.expect("now falls inside the week");
        assert_eq!(now.day_index, 2);
        assert_eq!(now.top, 288.0); // (10.5 - 6) * 64
        assert_eq!(now.left_pct, 37.5);
        assert_eq!(now.right_pct, 62.5);
    }

    #[test]
    fn now_marker_absent_outside_week_or_window() {
        let engine = GridLayoutEngine::new();
        assert!(engine.layout(&week(), &[], at(10, 12, 0)).now.is_none());
        assert!(engine.layout(&week(), &[], at(4, 3, 0)).now.is_none());
    }

    #[test]
    fn hour_labels_match_gutter_format() {
        let labels = GridConfig::default().hour_labels();
        assert_eq!(labels.len(), 15);
        assert_eq!(labels[0], "6 AM");
        assert_eq!(labels[6], "12 PM");
        assert_eq!(labels[14], "8 PM");
    }

    proptest! {
        #[test]
        fn blocks_never_fall_below_the_height_floor(
            day in 2u32..9,
            start_min in 0u32..1440,
            end_min in 0u32..1440,
        ) {
            let start = at(day, start_min / 60, start_min % 60);
            let end = at(day, end_min / 60, end_min % 60);
            let engine = GridLayoutEngine::new();
            let layout = engine.layout(&week(), &[meeting("p", start, end)], at(1, 0, 0));
            for block in &layout.blocks {
                prop_assert!(block.height >= MIN_BLOCK_HEIGHT_PX);
                prop_assert!(block.day_index <= 6);
            }
        }
    }
}
