use clap::Subcommand;
use collabdesk_core::{Config, EventStore, RestClient};

use super::fetch_events;

#[derive(Subcommand)]
pub enum EventsAction {
    /// List workspace events
    List {
        /// Read the cached snapshot instead of the remote store
        #[arg(long)]
        offline: bool,
    },
    /// Delete an event by id
    Delete {
        /// Server-assigned event id
        id: String,
    },
}

pub fn run(action: EventsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        EventsAction::List { offline } => {
            let events = fetch_events(&config, offline)?;
            if events.is_empty() {
                println!("no events");
            }
            for event in events {
                println!(
                    "{}  {} - {}  {} [{}]",
                    event.id,
                    event.start.format("%Y-%m-%d %H:%M"),
                    event.end.format("%H:%M"),
                    event.title,
                    event.kind.as_str(),
                );
            }
        }
        EventsAction::Delete { id } => {
            let client = RestClient::from_config(&config)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(client.delete_event(&id))?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
