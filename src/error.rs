//! Error types returned by this crate

use thiserror::Error;

/// Everything that can go wrong while talking to the events API or to the local store
#[derive(Error, Debug)]
pub enum Error {
    /// A credential is missing, or a setting cannot be used
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The events API answered with a non-success HTTP status
    #[error("{message} (HTTP {status})")]
    Upstream { status: u16, message: String },

    /// The request could not be sent, or its body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body or a store file is not valid JSON for the expected shape
    #[error("Unable to decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The saved-events store already holds as many events as it can
    #[error("Você já salvou o máximo de {max} eventos!")]
    Capacity { max: usize },
}

impl Error {
    /// Whether this error is the "store is full" warning, which callers usually show and move on
    pub fn is_capacity(&self) -> bool {
        matches!(self, Error::Capacity { .. })
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
