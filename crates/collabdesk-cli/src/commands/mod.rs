pub mod block;
pub mod calendar;
pub mod config;
pub mod events;
pub mod schedule;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use collabdesk_core::{Config, EventCache, EventStore, JsonFileStore, RestClient};

/// Interpret a wall-clock value in the local timezone and convert to UTC.
/// Times the local zone skips (DST gaps) fall back to a UTC reading.
pub(crate) fn wall_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

/// Parse a "YYYY-MM-DD" argument.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}': expected YYYY-MM-DD").into())
}

/// Fetch the workspace event snapshot.
///
/// Online fetches refresh the per-workspace cache; `offline` reads the last
/// cached snapshot instead of touching the network. Fetch failures are
/// reported, never retried.
pub(crate) fn fetch_events(
    config: &Config,
    offline: bool,
) -> Result<Vec<collabdesk_core::CalendarEvent>, Box<dyn std::error::Error>> {
    let cache = EventCache::new(JsonFileStore::open_default()?);
    let workspace = config.api.workspace_id.as_str();

    if offline {
        return Ok(cache.load_events(workspace));
    }

    let client = RestClient::from_config(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let events = runtime.block_on(client.list_events())?;
    if let Err(err) = cache.save_events(workspace, &events) {
        eprintln!("warning: could not refresh event cache: {err}");
    }
    Ok(events)
}
