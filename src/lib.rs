//! This crate lets a user discover events from a public events catalog, and keep a small list of favorites.
//!
//! It provides a client for the events API in the [`client`] module, that can be used as a stand-alone module.
//!
//! API records are heterogeneous and often incomplete. The [`normalize`] module turns them into display strings,
//! and into the [`SavedEvent`] summaries that are kept in a local [`store`].
//!
//! The event source and the saved events can be used together in a [`Provider`](provider::Provider),
//! which implements what users usually do: browse, then save or forget events.

pub mod traits;

pub mod error;
pub use error::{Error, Result};
pub mod event;
pub use event::RawEvent;
mod saved_event;
pub use saved_event::SavedEvent;
pub mod normalize;
pub mod provider;
pub use provider::Provider;

pub mod client;
pub mod store;
pub use store::SavedEvents;

pub mod config;
pub mod utils;
