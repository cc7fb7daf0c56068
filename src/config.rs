//! Support for library configuration options

use std::path::PathBuf;

use once_cell::sync::Lazy;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable that holds the events API key
pub const API_KEY_VAR: &str = "TICKETMASTER_API_KEY";
/// Environment variable that overrides the events API base URL (mostly useful for tests and proxies)
pub const BASE_URL_VAR: &str = "EVENTHUB_BASE_URL";

/// Where the Discovery API lives
pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// How many events the "popular" listing shows
pub const POPULAR_PAGE_SIZE: u32 = 6;
/// How many events a search page holds
pub const SEARCH_PAGE_SIZE: u32 = 12;
/// Every listing is restricted to this market
pub const COUNTRY_CODE: &str = "US";
/// Every listing is sorted this way
pub const SORT_ORDER: &str = "date,asc";
/// How long a popular-events or single-event response can be reused, in seconds
pub const REVALIDATE_SECS: u64 = 3600;

/// Namespaced key the saved events are stored under
pub const SAVED_EVENTS_KEY: &str = "eventhub-saved-events";

/// Per-user folder for this application's data.
/// Falls back to the current folder on platforms without a data dir.
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventhub")
});


/// Settings needed to talk to the events API
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    api_key: Option<String>,
    base_url: Url,
}

impl Settings {
    /// Build settings from explicit values
    pub fn new<S: ToString>(api_key: Option<S>, base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let api_key = api_key
            .map(|k| k.to_string())
            .filter(|k| k.trim().is_empty() == false);

        Ok(Self { api_key, base_url })
    }

    /// Read settings from the environment.
    ///
    /// A missing API key is not an error here: it is only reported when a request is about to be made,
    /// so that the local store keeps working without credentials.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok();
        if api_key.is_none() {
            log::warn!("{} is not set, requests to the events API will fail", API_KEY_VAR);
        }
        let base_url = std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, &base_url)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The API key, or the error every API call reports when it is missing
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key()
            .ok_or_else(|| Error::Configuration("API Key não configurada".to_string()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// `Url::join` drops the last path segment unless the base ends with a slash
fn parse_base_url(raw: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&with_slash)
        .map_err(|err| Error::Configuration(format!("Invalid base URL {:?}: {}", raw, err)))
}
