use chrono::{Local, NaiveTime};
use clap::Args;
use collabdesk_core::{Config, EventKind, EventStore, NewEvent, RestClient};

use super::{parse_date, wall_to_utc};

#[derive(Args)]
pub struct BlockArgs {
    /// Reason shown on the calendar
    #[arg(long, default_value = "OOO")]
    pub reason: String,
    /// First blocked day, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start_date: Option<String>,
    /// Start of the block, HH:MM
    #[arg(long, default_value = "07:30")]
    pub start_time: String,
    /// Last blocked day, YYYY-MM-DD (defaults to the start day)
    #[arg(long)]
    pub end_date: Option<String>,
    /// End of the block, HH:MM
    #[arg(long, default_value = "17:30")]
    pub end_time: String,
}

pub fn run(args: BlockArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let start_date = args.start_date.unwrap_or_else(|| today.clone());
    let end_date = args.end_date.unwrap_or_else(|| start_date.clone());

    let start = parse_date(&start_date)?.and_time(parse_time(&args.start_time)?);
    let end = parse_date(&end_date)?.and_time(parse_time(&args.end_time)?);
    if end <= start {
        return Err("end must be after start".into());
    }

    let reason = args.reason.trim();
    let title = if reason.is_empty() { "Unavailable" } else { reason };

    let config = Config::load_or_default();
    let event = NewEvent {
        title: title.to_string(),
        description: "User marked as unavailable".to_string(),
        start: wall_to_utc(start),
        end: wall_to_utc(end),
        kind: EventKind::Unavailable,
        workspace_id: config.api.workspace_id.clone(),
    };

    let client = RestClient::from_config(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let created = runtime.block_on(client.create_event(&event))?;
    println!(
        "blocked {} - {}: {}",
        created.start.format("%Y-%m-%d %H:%M"),
        created.end.format("%Y-%m-%d %H:%M"),
        created.id,
    );
    Ok(())
}

fn parse_time(value: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("invalid time '{value}': expected HH:MM").into())
}
