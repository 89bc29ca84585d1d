use clap::{Args, Subcommand};
use collabdesk_core::{
    BookingFlow, Config, EventKind, EventStore, NewEvent, RestClient,
};

use super::wall_to_utc;

#[derive(Args)]
pub struct MeetingArgs {
    /// Meeting title
    #[arg(long)]
    pub title: String,
    /// Target day, YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// Duration in minutes
    #[arg(long, default_value_t = 30)]
    pub duration: i64,
    /// Attendee id (repeatable)
    #[arg(long = "attendee", required = true)]
    pub attendees: Vec<String>,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the three recommended slots
    Find {
        #[command(flatten)]
        meeting: MeetingArgs,
    },
    /// Book one of the recommended slots
    Book {
        #[command(flatten)]
        meeting: MeetingArgs,
        /// Slot to book, 1-3
        #[arg(long)]
        slot: usize,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Find { meeting } => {
            let mut flow = flow_for(&meeting);
            let slots = flow.find_times()?;
            println!("{}", serde_json::to_string_pretty(slots)?);
        }
        ScheduleAction::Book { meeting, slot } => {
            if !(1..=3).contains(&slot) {
                return Err(format!("slot {slot} out of range: expected 1-3").into());
            }
            let mut flow = flow_for(&meeting);
            flow.find_times()?;
            let request = flow.select(slot - 1)?;

            let config = Config::load_or_default();
            let event = NewEvent {
                title: request.title.clone(),
                description: request.description.clone(),
                start: wall_to_utc(request.start),
                end: wall_to_utc(request.end),
                kind: EventKind::Meeting,
                workspace_id: config.api.workspace_id.clone(),
            };

            let client = RestClient::from_config(&config)?;
            let runtime = tokio::runtime::Runtime::new()?;
            match runtime.block_on(client.create_event(&event)) {
                Ok(created) => {
                    flow.complete()?;
                    println!(
                        "booked {} ({} - {}): {}",
                        created.title,
                        created.start.format("%Y-%m-%d %H:%M"),
                        created.end.format("%H:%M"),
                        created.id,
                    );
                }
                Err(err) => {
                    flow.fail(err.to_string())?;
                    return Err(format!("booking failed: {err}").into());
                }
            }
        }
    }
    Ok(())
}

fn flow_for(meeting: &MeetingArgs) -> BookingFlow {
    let mut flow = BookingFlow::new();
    flow.set_title(meeting.title.as_str());
    flow.set_date(meeting.date.as_str());
    flow.set_duration(meeting.duration);
    for attendee in &meeting.attendees {
        flow.toggle_attendee(attendee.as_str());
    }
    flow
}
