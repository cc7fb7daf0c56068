//! The lightweight event summaries that are kept in the saved-events store

use serde::{Deserialize, Serialize};

use crate::normalize::EventStatus;

/// A saved event.
///
/// This is a projection of a [`RawEvent`](crate::event::RawEvent) (see [`to_saved_event`](crate::normalize::to_saved_event)).
/// It is never modified once stored: saving the same event again is ignored rather than merged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEvent {
    pub id: String,
    pub name: String,
    /// ISO calendar date, exactly as the API gave it
    pub date: String,
    pub venue: String,
    pub city: String,
    pub image_url: String,
    /// Where tickets can be bought
    pub url: String,
}

impl SavedEvent {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// No sale data is kept for saved events, so they always look open
    pub fn status(&self) -> EventStatus {
        EventStatus::OnSale
    }
}
