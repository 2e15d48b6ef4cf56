//! # Sync Engine
//!
//! Mirrors one remote video library into the local catalog.
//!
//! ## Overview
//!
//! - [`engine`] - [`SyncEngine`], the orchestrator; one call per full pass
//! - [`run`] - run phase state machine and the final [`SyncReport`]
//! - [`credentials`] - scoped key resolution with settings-backed caching
//! - [`pager`] - pagination cursor over the remote listing
//! - [`reconciler`] - guid-keyed upserts into the local catalog
//! - [`thumbnails`] - best-effort thumbnail sideloading
//! - [`orphans`] - deletion of records gone from the remote
//! - [`scheduler`] - fixed-cadence background syncing
//!
//! The engine is deliberately sequential: one page fetch, then its upserts,
//! then the next page. Listing failures abort the run but keep completed
//! upserts; thumbnail failures never abort anything.

pub mod credentials;
pub mod engine;
pub mod error;
pub mod keys;
pub mod orphans;
pub mod pager;
pub mod reconciler;
pub mod run;
pub mod scheduler;
pub mod thumbnails;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::SyncEngine;
pub use error::{Result, SyncError};
pub use pager::DEFAULT_PAGE_SIZE;
pub use reconciler::UpsertOutcome;
pub use run::{SyncPhase, SyncReport, SyncRun};
pub use scheduler::{spawn_periodic_sync, DEFAULT_SYNC_INTERVAL};
