//! Remote Catalog Abstraction
//!
//! Wire-neutral types for the remote video listing API plus the
//! [`CatalogProvider`] trait that connectors implement.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::Result;

/// A remote video library: a provider-side namespace of videos, each with
/// its own scoped access key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLibrary {
    /// Library identifier
    pub id: String,

    /// Human-readable library name
    pub name: String,

    /// Library-scoped access key for the listing endpoint
    pub scoped_key: String,
}

/// One video record as returned by the remote listing.
///
/// `guid` is the stable reconciliation key. The full remote payload is kept
/// verbatim in `metadata` so local records can persist it for later use.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteVideo {
    /// Stable opaque identifier; empty when the remote record has none
    pub guid: String,

    /// Video title
    pub title: Option<String>,

    /// Long-form description
    pub description: Option<String>,

    /// Short summary (some listings populate this instead of description)
    pub summary: Option<String>,

    /// The full remote record, preserved verbatim
    pub metadata: Value,
}

impl RemoteVideo {
    /// Title to display locally; falls back to the guid when absent or blank.
    pub fn display_title(&self) -> &str {
        match &self.title {
            Some(title) if !title.is_empty() => title,
            _ => &self.guid,
        }
    }

    /// Body text for the local record: description, falling back to summary.
    pub fn body_text(&self) -> &str {
        self.description
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("")
    }
}

/// One page of a paginated video listing.
///
/// The count fields are optional because the server may omit them; the
/// pagination predicate treats any missing field as "no further pages".
#[derive(Debug, Clone, Default)]
pub struct VideoPage {
    /// Videos on this page
    pub items: Vec<RemoteVideo>,

    /// Total items across all pages, if reported
    pub total_items: Option<i64>,

    /// The page number the server believes it served, if reported
    pub current_page: Option<i64>,

    /// Page size the server applied, if reported
    pub items_per_page: Option<i64>,
}

impl VideoPage {
    /// Whether another page should be fetched.
    ///
    /// Continues only when all three count fields are present, the count
    /// arithmetic says more items remain, AND this page was non-empty. The
    /// non-empty clause guards against servers reporting stale totals, which
    /// would otherwise loop forever.
    pub fn has_more(&self) -> bool {
        let counted_more = match (self.total_items, self.current_page, self.items_per_page) {
            (Some(total), Some(current), Some(per_page)) => current * per_page < total,
            _ => false,
        };
        counted_more && !self.items.is_empty()
    }
}

/// Remote video catalog trait
///
/// Two authenticated read endpoints plus the unauthenticated thumbnail CDN.
/// Calls are single attempts with a bounded timeout; implementations must
/// not retry internally.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List all libraries on the account, including their scoped keys.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-2xx status, or a
    /// body that does not parse.
    async fn list_libraries(&self, primary_key: &str) -> Result<Vec<RemoteLibrary>>;

    /// Fetch one page of the library's video listing, newest first.
    ///
    /// `page` is 1-based.
    async fn list_videos(
        &self,
        library_id: &str,
        scoped_key: &str,
        page: u32,
        page_size: u32,
    ) -> Result<VideoPage>;

    /// Download the deterministic thumbnail for one video.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status. Callers
    /// treat thumbnail failures as best-effort skips, never run-fatal.
    async fn fetch_thumbnail(&self, library_id: &str, guid: &str) -> Result<Bytes>;
}
