//! This module provides a client for the events API (Ticketmaster Discovery v2)

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Settings, COUNTRY_CODE, POPULAR_PAGE_SIZE, REVALIDATE_SECS, SEARCH_PAGE_SIZE, SORT_ORDER};
use crate::error::{Error, Result};
use crate::event::{EventPage, RawEvent};
use crate::traits::{EventSource, SearchParams};

static LIST_ERROR: &str = "Erro ao buscar eventos";
static NOT_FOUND_ERROR: &str = "Evento não encontrado";


/// A response body kept for the revalidation window
struct CachedBody {
    fetched_at: Instant,
    body: String,
}

/// An [`EventSource`] that fetches its data from the events API.
///
/// The popular listing and single events are reused for [`REVALIDATE_SECS`] seconds.
/// Searches always hit the API.
pub struct Client {
    settings: Settings,
    http: reqwest::Client,
    revalidate: Duration,
    cached: HashMap<String, CachedBody>,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
            revalidate: Duration::from_secs(REVALIDATE_SECS),
            cached: HashMap::new(),
        }
    }

    /// Create a client configured from the environment (see [`Settings::from_env`])
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Settings::from_env()?))
    }

    /// Change how long responses are reused. `Duration::ZERO` disables reuse
    pub fn with_revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Forget every reused response
    pub fn clear_cached(&mut self) {
        self.cached.clear();
    }

    /// Build an endpoint URL. `segments` are appended (and escaped) after the base path
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let api_key = self.settings.require_api_key()?;

        let mut url = self.settings.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| Error::Configuration(format!("{} cannot be used as a base URL", self.settings.base_url())))?
            .pop_if_empty()
            .extend(segments);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", api_key);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send a GET request and return the body of a successful response
    async fn get_text(&self, url: &Url, error_message: &str) -> Result<String> {
        log::debug!("GET {}", url.path());
        let res = self.http.get(url.as_str()).send().await?;

        let status = res.status();
        if status.is_success() == false {
            log::warn!("{} answered {}", url.path(), status);
            return Err(Error::Upstream { status: status.as_u16(), message: error_message.to_string() });
        }

        Ok(res.text().await?)
    }

    /// Same as `get_text`, but reuse a body fetched less than `self.revalidate` ago
    async fn get_revalidated(&mut self, url: &Url, error_message: &str) -> Result<String> {
        let key = url.as_str().to_string();
        if let Some(cached) = self.cached.get(&key) {
            if cached.fetched_at.elapsed() < self.revalidate {
                log::trace!("Reusing response for {}", url.path());
                return Ok(cached.body.clone());
            }
        }

        let body = self.get_text(url, error_message).await?;
        self.remember(key, body.clone());
        Ok(body)
    }

    /// Keep `body` for later reuse, and forget the responses that can no longer be reused
    fn remember(&mut self, key: String, body: String) {
        let revalidate = self.revalidate;
        self.cached.retain(|_, cached| cached.fetched_at.elapsed() < revalidate);
        if revalidate > Duration::ZERO {
            self.cached.insert(key, CachedBody { fetched_at: Instant::now(), body });
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| {
        log::warn!("Unexpected response from the events API: {}", err);
        Error::from(err)
    })
}

/// The query parameters of a search, in the order the API documents them
fn search_query(params: &SearchParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("size", SEARCH_PAGE_SIZE.to_string()),
        ("countryCode", COUNTRY_CODE.to_string()),
        ("sort", SORT_ORDER.to_string()),
    ];

    let optional = [
        ("keyword", &params.keyword),
        ("city", &params.city),
        ("startDateTime", &params.start_date),
        ("endDateTime", &params.end_date),
    ];
    for (key, value) in optional.iter() {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| v.is_empty() == false) {
            query.push((*key, value.to_string()));
        }
    }

    if let Some(page) = params.page.filter(|p| *p > 0) {
        query.push(("page", page.to_string()));
    }
    query
}

#[async_trait]
impl EventSource for Client {
    async fn popular_events(&mut self) -> Result<Vec<RawEvent>> {
        let url = self.endpoint(&["events.json"], &[
            ("size", POPULAR_PAGE_SIZE.to_string()),
            ("countryCode", COUNTRY_CODE.to_string()),
            ("sort", SORT_ORDER.to_string()),
        ])?;

        let body = self.get_revalidated(&url, LIST_ERROR).await?;
        let page: EventPage = decode(&body)?;
        log::info!("Found {} popular events", page.events().len());
        Ok(page.into_events())
    }

    async fn search_events(&mut self, params: &SearchParams) -> Result<EventPage> {
        let url = self.endpoint(&["events.json"], &search_query(params))?;

        let body = self.get_text(&url, LIST_ERROR).await?;
        let page: EventPage = decode(&body)?;
        log::info!("Search returned {} events", page.events().len());
        Ok(page)
    }

    async fn event_by_id(&mut self, id: &str) -> Result<RawEvent> {
        let file = format!("{}.json", id);
        let url = self.endpoint(&["events", file.as_str()], &[])?;

        let body = self.get_revalidated(&url, NOT_FOUND_ERROR).await?;
        decode(&body)
    }
}
