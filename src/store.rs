//! This module provides the local store of saved events

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{DATA_DIR, SAVED_EVENTS_KEY};
use crate::error::{Error, Result};
use crate::saved_event::SavedEvent;

/// How many events a user can save
pub const MAX_SAVED_EVENTS: usize = 5;

/// Version of the on-disk format
const STORAGE_VERSION: u32 = 0;


/// What [`SavedEvents::add`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An event with this id was already saved. Nothing changed
    AlreadySaved,
}

/// The user's answer to "remove every saved event?"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed { Confirmation::Confirmed } else { Confirmation::Cancelled }
    }
}

/// How full the store is. Only `Full` changes how the store behaves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityState {
    Empty,
    Partial,
    Full,
}


/// A list of saved events, backed by a local JSON file.
///
/// Every mutation is written to the backing file right away.
/// Events keep the order they were saved in, and no two events share the same id.
#[derive(Debug, PartialEq)]
pub struct SavedEvents {
    backing_file: PathBuf,
    data: StoredData,
}

/// The file layout. This is the same envelope the web version kept in its local storage
#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct StoredData {
    state: StoredState,
    #[serde(default)]
    version: u32,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    #[serde(default)]
    saved_events: Vec<SavedEvent>,
}

impl SavedEvents {
    /// Get the path to the default store file
    pub fn default_path() -> PathBuf {
        DATA_DIR.join(format!("{}.json", SAVED_EVENTS_KEY))
    }

    /// Initialize a store from the content of a valid backing file.
    /// Returns an error if the file cannot be read or is not a valid store
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let data: StoredData = serde_json::from_reader(file)?;
        if data.version != STORAGE_VERSION {
            log::warn!("Store file {:?} has version {}, expected {}", path, data.version, STORAGE_VERSION);
        }

        let mut store = Self {
            backing_file: PathBuf::from(path),
            data,
        };
        store.enforce_invariants();
        Ok(store)
    }

    /// Initialize an empty store, that will be saved to `path`
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: StoredData::default(),
        }
    }

    /// Load the store from `path`, or start an empty one if there is no valid file there
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() == false {
            log::debug!("No store file at {:?}, starting with no saved events", path);
            return Self::new(path);
        }

        match Self::from_file(path) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Invalid store file {:?}: {}. Starting with no saved events", path, err);
                Self::new(path)
            }
        }
    }

    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    /// Store the current events to the backing file
    pub fn save_to_file(&self) -> Result<()> {
        write_data(&self.backing_file, &self.data)
    }

    /// Persist `events` as the new content of the store.
    /// The in-memory list is only replaced once the file has been written
    fn commit(&mut self, events: Vec<SavedEvent>) -> Result<()> {
        let data = StoredData {
            state: StoredState { saved_events: events },
            version: self.data.version,
        };
        write_data(&self.backing_file, &data)?;
        self.data = data;
        Ok(())
    }

    /// A hand-edited file may break the invariants this store relies on.
    /// Drop duplicates and anything past the capacity, keeping the oldest entries.
    fn enforce_invariants(&mut self) {
        let events = &mut self.data.state.saved_events;
        let before = events.len();

        let mut seen = std::collections::HashSet::new();
        events.retain(|e| seen.insert(e.id.clone()));
        events.truncate(MAX_SAVED_EVENTS);

        if events.len() != before {
            log::warn!("Dropped {} duplicate or extra saved events from {:?}", before - events.len(), self.backing_file);
        }
    }


    /// Save an event.
    ///
    /// Fails with [`Error::Capacity`] when [`MAX_SAVED_EVENTS`] events are already saved, even if `event` is one of them.
    /// Saving an event whose id is already known does nothing.
    pub fn add(&mut self, event: SavedEvent) -> Result<AddOutcome> {
        if self.len() >= MAX_SAVED_EVENTS {
            log::warn!("Not saving event {}: already {} saved events", event.id, self.len());
            return Err(Error::Capacity { max: MAX_SAVED_EVENTS });
        }

        if self.is_saved(&event.id) {
            log::debug!("Event {} is already saved", event.id);
            return Ok(AddOutcome::AlreadySaved);
        }

        log::info!("Saving event {} ({})", event.id, event.name);
        let mut events = self.data.state.saved_events.clone();
        events.push(event);
        self.commit(events)?;
        Ok(AddOutcome::Added)
    }

    /// Remove the event with this id. Returns whether there was one
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if self.is_saved(id) == false {
            log::debug!("Event {} was not saved, nothing to remove", id);
            return Ok(false);
        }

        let events = self.data.state.saved_events.iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(events)?;
        log::info!("Removed saved event {}", id);
        Ok(true)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.data.state.saved_events.iter().any(|e| e.id == id)
    }

    /// Remove every saved event, provided the user has confirmed it
    pub fn clear_all(&mut self, confirmation: Confirmation) -> Result<()> {
        if confirmation == Confirmation::Cancelled {
            log::debug!("Clearing saved events was cancelled");
            return Ok(());
        }

        log::info!("Removing all {} saved events", self.len());
        self.commit(Vec::new())
    }

    /// The saved events, oldest first
    pub fn events(&self) -> &[SavedEvent] {
        &self.data.state.saved_events
    }

    pub fn get(&self, id: &str) -> Option<&SavedEvent> {
        self.data.state.saved_events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.data.state.saved_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.state.saved_events.is_empty()
    }

    /// How many more events can be saved
    pub fn remaining(&self) -> usize {
        MAX_SAVED_EVENTS.saturating_sub(self.len())
    }

    pub fn capacity_state(&self) -> CapacityState {
        match self.len() {
            0 => CapacityState::Empty,
            n if n >= MAX_SAVED_EVENTS => CapacityState::Full,
            _ => CapacityState::Partial,
        }
    }
}

fn write_data(path: &Path, data: &StoredData) -> Result<()> {
    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() == false {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    serde_json::to_writer(file, data)?;
    log::trace!("Saved {} events to {:?}", data.state.saved_events.len(), path);
    Ok(())
}
