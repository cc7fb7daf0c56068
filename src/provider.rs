//! This module combines an event source with the local store of saved events
//!
//! This is what the user-facing code usually talks to: it browses events from the remote source,
//! and saves or forgets them in the local store.

use crate::error::{Error, Result};
use crate::event::{EventPage, RawEvent};
use crate::normalize::to_saved_event;
use crate::store::{AddOutcome, CapacityState, SavedEvents, MAX_SAVED_EVENTS};
use crate::traits::{EventSource, SearchParams};

/// What [`Provider::toggle_saved`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Saved,
    Removed,
}

/// An event source (usually a [`Client`](crate::client::Client)) together with the saved events
pub struct Provider<R>
where
    R: EventSource,
{
    /// The remote source (usually the events API)
    remote: R,
    /// The saved events
    local: SavedEvents,
}

impl<R> Provider<R>
where
    R: EventSource,
{
    /// Create a provider.
    ///
    /// `remote` is usually a [`Client`](crate::client::Client), and `local` a store loaded at startup.
    pub fn new(remote: R, local: SavedEvents) -> Self {
        Self { remote, local }
    }

    /// Returns the saved events
    pub fn local(&self) -> &SavedEvents { &self.local }
    /// Returns the saved events
    pub fn local_mut(&mut self) -> &mut SavedEvents { &mut self.local }
    /// Returns the event source
    pub fn remote(&self) -> &R { &self.remote }
    /// Returns the event source
    pub fn remote_mut(&mut self) -> &mut R { &mut self.remote }

    pub async fn popular(&mut self) -> Result<Vec<RawEvent>> {
        self.remote.popular_events().await
    }

    /// Search the remote source. Nothing is requested when `params` has no criterion at all
    pub async fn search(&mut self, params: &SearchParams) -> Result<EventPage> {
        if params.is_empty() {
            log::debug!("Empty search, not querying the remote source");
            return Ok(EventPage::default());
        }
        self.remote.search_events(params).await
    }

    pub async fn event(&mut self, id: &str) -> Result<RawEvent> {
        self.remote.event_by_id(id).await
    }

    /// Forget `event` if it is saved, save it otherwise.
    ///
    /// Saving fails with [`Error::Capacity`](crate::error::Error::Capacity) when the store is full.
    pub fn toggle_saved(&mut self, event: &RawEvent) -> Result<Toggle> {
        if self.local.is_saved(&event.id) {
            self.local.remove(&event.id)?;
            return Ok(Toggle::Removed);
        }

        self.local.add(to_saved_event(event))?;
        Ok(Toggle::Saved)
    }

    /// Fetch an event from the remote source and save it.
    ///
    /// Nothing is fetched when the store would refuse the event anyway.
    pub async fn save_by_id(&mut self, id: &str) -> Result<AddOutcome> {
        if self.local.capacity_state() == CapacityState::Full {
            return Err(Error::Capacity { max: MAX_SAVED_EVENTS });
        }
        if self.local.is_saved(id) {
            return Ok(AddOutcome::AlreadySaved);
        }

        let event = self.remote.event_by_id(id).await?;
        self.local.add(to_saved_event(&event))
    }
}
