//! Workspace-keyed local event cache.
//!
//! The host keeps a per-workspace snapshot of events so the calendar can
//! render while offline. Persistence goes through a small key-value
//! capability; the default backend is one JSON file per key under the data
//! directory.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarEvent;
use crate::config::data_dir;

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal string key-value persistence capability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One JSON file per key under a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at an explicit directory (created on demand).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the application data directory.
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(data_dir()?))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Cached snapshot entry. Only the fields the calendar needs survive the
/// roundtrip.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEvents {
    events: Vec<CalendarEvent>,
}

/// Per-workspace event snapshot cache over any [`KeyValueStore`].
pub struct EventCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> EventCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(workspace: &str) -> String {
        format!("events.{workspace}")
    }

    /// Load the cached snapshot for a workspace.
    ///
    /// A missing or unreadable entry loads as an empty list; the cache is a
    /// convenience, never a source of errors at read time.
    pub fn load_events(&self, workspace: &str) -> Vec<CalendarEvent> {
        self.store
            .get(&Self::key(workspace))
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<CachedEvents>(&raw).ok())
            .map(|cached| cached.events)
            .unwrap_or_default()
    }

    /// Replace the cached snapshot for a workspace.
    pub fn save_events(
        &self,
        workspace: &str,
        events: &[CalendarEvent],
    ) -> Result<(), StoreError> {
        let cached = CachedEvents {
            events: events.to_vec(),
        };
        self.store
            .set(&Self::key(workspace), &serde_json::to_string(&cached)?)
    }

    /// Drop the cached snapshot for a workspace.
    pub fn clear(&self, workspace: &str) -> Result<(), StoreError> {
        self.store.remove(&Self::key(workspace))
    }
}
