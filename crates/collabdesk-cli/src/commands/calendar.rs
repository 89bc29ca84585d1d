use chrono::{NaiveTime, TimeZone, Utc};
use clap::Subcommand;
use collabdesk_core::{sorted_agenda, Config, GridLayoutEngine, WeekAnchor};

use super::{fetch_events, parse_date};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show the week grid placements as JSON
    Week {
        /// Any day of the target week, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Read the cached snapshot instead of the remote store
        #[arg(long)]
        offline: bool,
    },
    /// Show the upcoming events of the week
    Agenda {
        /// Any day of the target week, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Read the cached snapshot instead of the remote store
        #[arg(long)]
        offline: bool,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        CalendarAction::Week { date, offline } => {
            let anchor = anchor_for(date.as_deref())?;
            let events = fetch_events(&config, offline)?;
            let engine = GridLayoutEngine::with_config(config.grid.to_grid_config());
            let layout = engine.layout(&anchor, &events, Utc::now());
            let view = serde_json::json!({
                "week_start": anchor.start().format("%Y-%m-%d").to_string(),
                "hours": engine.config().hour_labels(),
                "layout": layout,
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        CalendarAction::Agenda { date, offline } => {
            let anchor = anchor_for(date.as_deref())?;
            let events = fetch_events(&config, offline)?;
            let week_events: Vec<_> = events
                .into_iter()
                .filter(|e| anchor.contains(e.start))
                .collect();
            let agenda = sorted_agenda(&week_events);
            if agenda.is_empty() {
                println!("No events this week.");
            }
            for event in agenda {
                println!(
                    "{}  {} - {}  {} [{}]",
                    event.start.format("%a, %b %-d"),
                    event.start.format("%-I:%M %p"),
                    event.end.format("%-I:%M %p"),
                    event.title,
                    event.kind.as_str(),
                );
            }
        }
    }
    Ok(())
}

fn anchor_for(date: Option<&str>) -> Result<WeekAnchor, Box<dyn std::error::Error>> {
    let instant = match date {
        Some(value) => {
            let day = parse_date(value)?;
            Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
        }
        None => Utc::now(),
    };
    Ok(WeekAnchor::containing(instant))
}
