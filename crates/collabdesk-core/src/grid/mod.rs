//! Week-view grid geometry.
//!
//! Turns a week anchor plus an event snapshot into absolute pixel placements
//! on a fixed-hour grid, together with the current-time indicator. Pure
//! computation: no I/O, no mutation of the input snapshot.

mod layout;

pub use layout::{
    EventBlock, GridConfig, GridLayoutEngine, NowMarker, WeekLayout, BLOCK_INSET_REM,
    DAY_COLUMN_PCT, GRID_COLUMNS, MIN_BLOCK_HEIGHT_PX,
};
