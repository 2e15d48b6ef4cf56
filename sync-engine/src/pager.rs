//! Remote listing pagination
//!
//! Walks the video listing one page at a time, newest first. Termination
//! follows the server-reported counts but always stops on an empty page,
//! so stale totals cannot loop forever.

use crate::{Result, SyncError};
use host_traits::{CatalogProvider, VideoPage};
use std::sync::Arc;
use tracing::debug;

/// Items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Cursor over the paginated remote listing for one library.
pub struct VideoPager {
    catalog: Arc<dyn CatalogProvider>,
    library_id: String,
    scoped_key: String,
    page_size: u32,
    next_page: u32,
    finished: bool,
}

impl VideoPager {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        library_id: impl Into<String>,
        scoped_key: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            library_id: library_id.into(),
            scoped_key: scoped_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            next_page: 1,
            finished: false,
        }
    }

    /// Override the page size. Used by tests; production syncs use
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `Remote` on any listing failure. The pager is finished after
    /// an error; a failed page is not retried.
    pub async fn next_page(&mut self) -> Result<Option<VideoPage>> {
        if self.finished {
            return Ok(None);
        }

        let page = self
            .catalog
            .list_videos(
                &self.library_id,
                &self.scoped_key,
                self.next_page,
                self.page_size,
            )
            .await
            .map_err(|e| {
                self.finished = true;
                SyncError::Remote(e.to_string())
            })?;

        debug!(
            page = self.next_page,
            items = page.items.len(),
            total = ?page.total_items,
            "fetched listing page"
        );

        if !page.has_more() {
            self.finished = true;
        }
        self.next_page += 1;

        Ok(Some(page))
    }
}
