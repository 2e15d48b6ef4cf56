//! # Local Catalog Store
//!
//! SQLite-backed storage for the mirrored video catalog: the content-record
//! store, the thumbnail asset store, and the key-value settings store the
//! sync engine depends on.
//!
//! ## Overview
//!
//! - [`db`] - pooled SQLite with WAL mode and embedded migrations
//! - [`models`] - [`VideoPost`](models::VideoPost) and
//!   [`Thumbnail`](models::Thumbnail) entities
//! - [`repositories`] - repository traits plus their `Sqlite*` implementations
//! - [`settings`] - [`SqliteSettingsStore`](settings::SqliteSettingsStore)
//!   implementing `host_traits::SettingsStore`
//!
//! Invariant: at most one `VideoPost` exists per `(library_id, guid)` pair,
//! enforced by a unique index. This is the reconciliation key.

pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod settings;

pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use error::{CatalogError, Result};
pub use models::{Thumbnail, VideoPost};
pub use repositories::{
    SqliteThumbnailRepository, SqliteVideoRepository, ThumbnailRepository, VideoRepository,
};
pub use settings::SqliteSettingsStore;
