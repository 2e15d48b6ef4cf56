//! # Bunny Stream Provider
//!
//! Implements the [`host_traits::CatalogProvider`] trait against the
//! Bunny.net Stream API family.
//!
//! ## Overview
//!
//! This crate provides:
//! - Account-level library listing (which carries each library's scoped key)
//! - Paginated video listing for one library, newest first
//! - Thumbnail downloads from the unauthenticated CDN
//! - Typed errors carrying the remote response body for diagnostics

pub mod connector;
pub mod error;
pub mod types;

pub use connector::BunnyConnector;
pub use error::{BunnyError, Result};
