//! Orphan collection
//!
//! After every page has been reconciled, local records whose guid was not
//! seen on any page are no longer present remotely and are permanently
//! deleted. Records with an empty guid were never synced and are left
//! untouched.
//!
//! The sweep is global: one library is configured at a time, so records
//! left over from a previously configured library are orphans too and get
//! removed on the first sync against the new library.

use crate::Result;
use core_catalog::VideoRepository;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Deletes local records that disappeared from the remote listing.
pub struct OrphanCollector {
    videos: Arc<dyn VideoRepository>,
}

impl OrphanCollector {
    pub fn new(videos: Arc<dyn VideoRepository>) -> Self {
        Self { videos }
    }

    /// Sweep the whole catalog, deleting records whose guid is not in
    /// `processed_guids`. Returns the number deleted.
    ///
    /// Must only run after a complete pagination pass; sweeping after a
    /// partial listing would delete records that still exist remotely.
    pub async fn sweep(&self, processed_guids: &HashSet<String>) -> Result<u64> {
        let mut deleted = 0u64;

        for post in self.videos.list_all().await? {
            if post.guid.is_empty() {
                continue;
            }
            if processed_guids.contains(&post.guid) {
                continue;
            }

            if self.videos.delete(&post.id).await? {
                debug!(guid = %post.guid, post_id = %post.id, "deleted orphaned record");
                deleted += 1;
            }
        }

        if deleted > 0 {
            info!(deleted, "orphan sweep removed records");
        }
        Ok(deleted)
    }
}
