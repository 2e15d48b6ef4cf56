//! # Host Collaborator Traits
//!
//! Abstractions over everything the sync engine borrows from its host:
//! the HTTP transport, the key-value settings store, the system clock, and
//! the remote video catalog itself.
//!
//! ## Overview
//!
//! The engine never talks to the network or the settings store directly.
//! Each capability is a trait defined here, implemented elsewhere:
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP with per-request timeouts
//! - [`CatalogProvider`](catalog::CatalogProvider) - the remote video listing API
//! - [`SettingsStore`](settings::SettingsStore) - persisted key-value configuration
//! - [`Clock`](time::Clock) - injectable time source for deterministic tests
//!
//! Concrete adapters live in `host-reqwest` (HTTP), `provider-bunny`
//! (catalog), and `core-catalog` (settings). Tests substitute mocks.
//!
//! All traits require `Send + Sync` so they can be shared across async tasks
//! behind `Arc<dyn _>`.

pub mod catalog;
pub mod error;
pub mod http;
pub mod settings;
pub mod time;

pub use error::{HostError, Result};

// Re-export commonly used types
pub use catalog::{CatalogProvider, RemoteLibrary, RemoteVideo, VideoPage};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use settings::SettingsStore;
pub use time::{Clock, SystemClock};
