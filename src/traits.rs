use async_trait::async_trait;

use crate::error::Result;
use crate::event::{EventPage, RawEvent};

/// Optional criteria of an event search. Empty criteria are not sent at all
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub city: Option<String>,
    /// Lower bound of the start date, as the API expects it (e.g. `2025-03-01T00:00:00Z`)
    pub start_date: Option<String>,
    /// Upper bound of the start date
    pub end_date: Option<String>,
    /// Zero-based page number. Page 0 is the default and is not sent
    pub page: Option<u32>,
}

impl SearchParams {
    pub fn keyword<S: ToString>(keyword: S) -> Self {
        Self { keyword: Some(keyword.to_string()), ..Self::default() }
    }

    /// Whether there is anything to search for at all
    pub fn is_empty(&self) -> bool {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
        }
        blank(&self.keyword) && blank(&self.city) && blank(&self.start_date) && blank(&self.end_date)
    }
}

/// A source of events, usually the remote API (see [`Client`](crate::client::Client))
#[async_trait]
pub trait EventSource {
    /// A short listing of upcoming events
    async fn popular_events(&mut self) -> Result<Vec<RawEvent>>;

    /// One page of events matching `params`
    async fn search_events(&mut self, params: &SearchParams) -> Result<EventPage>;

    /// A single event. Unknown ids are an error
    async fn event_by_id(&mut self, id: &str) -> Result<RawEvent>;
}
