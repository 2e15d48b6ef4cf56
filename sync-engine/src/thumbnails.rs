//! Best-effort thumbnail sideloading
//!
//! After a record is upserted, its thumbnail is fetched once and stored
//! locally. A record that already has a thumbnail is never refetched, and
//! no failure here can fail the sync run.

use core_catalog::{Thumbnail, ThumbnailRepository};
use host_traits::{CatalogProvider, Clock};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches and attaches thumbnails for synced records.
pub struct ThumbnailFetcher {
    catalog: Arc<dyn CatalogProvider>,
    thumbnails: Arc<dyn ThumbnailRepository>,
    clock: Arc<dyn Clock>,
}

impl ThumbnailFetcher {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        thumbnails: Arc<dyn ThumbnailRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            thumbnails,
            clock,
        }
    }

    /// Ensure `post_id` has a thumbnail. Skips silently when one exists
    /// already or the fetch fails; a missed thumbnail is retried on a
    /// later run only if the record still has none.
    pub async fn ensure(&self, library_id: &str, guid: &str, post_id: &str) {
        match self.thumbnails.exists_for_post(post_id).await {
            Ok(true) => return,
            Ok(false) => {}
            Err(e) => {
                warn!(post_id, error = %e, "thumbnail existence check failed");
                return;
            }
        }

        let data = match self.catalog.fetch_thumbnail(library_id, guid).await {
            Ok(data) => data,
            Err(e) => {
                debug!(guid, error = %e, "thumbnail fetch failed, skipping");
                return;
            }
        };

        let thumbnail = Thumbnail::new(
            post_id,
            format!("{}.jpg", guid),
            "image/jpeg",
            data.to_vec(),
            self.clock.unix_timestamp(),
        );
        if let Err(e) = self.thumbnails.attach(&thumbnail).await {
            warn!(post_id, error = %e, "failed to store thumbnail");
        }
    }
}
