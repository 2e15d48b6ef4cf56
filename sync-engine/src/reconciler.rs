//! Page reconciliation
//!
//! Upserts remote videos into the local catalog, keyed by
//! `(library_id, guid)`. Created records start published; updates refresh
//! title, body, and the raw metadata copy while keeping the local id and
//! creation time.

use crate::{Result, SyncError};
use core_catalog::{VideoPost, VideoRepository};
use host_traits::{Clock, RemoteVideo};
use std::sync::Arc;
use tracing::debug;

/// What an upsert did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was created
    Created {
        /// Local id of the new record
        post_id: String,
    },
    /// An existing record was refreshed
    Updated {
        /// Local id of the refreshed record
        post_id: String,
    },
}

impl UpsertOutcome {
    /// Local id of the record the upsert touched
    pub fn post_id(&self) -> &str {
        match self {
            UpsertOutcome::Created { post_id } | UpsertOutcome::Updated { post_id } => post_id,
        }
    }
}

/// Applies remote videos to the local catalog.
pub struct Reconciler {
    videos: Arc<dyn VideoRepository>,
    clock: Arc<dyn Clock>,
}

impl Reconciler {
    pub fn new(videos: Arc<dyn VideoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { videos, clock }
    }

    /// Upsert one remote video.
    ///
    /// Callers must skip videos with an empty guid before reaching here;
    /// an empty guid would collide with manually curated records.
    pub async fn upsert(&self, library_id: &str, video: &RemoteVideo) -> Result<UpsertOutcome> {
        let raw_metadata = serde_json::to_string(&video.metadata)
            .map_err(|e| SyncError::Remote(format!("unserializable metadata: {}", e)))?;
        let now = self.clock.unix_timestamp();

        match self.videos.find_by_guid(library_id, &video.guid).await? {
            Some(mut existing) => {
                existing.title = video.display_title().to_string();
                existing.body = video.body_text().to_string();
                existing.raw_metadata = raw_metadata;
                existing.updated_at = now;
                self.videos.update(&existing).await?;
                debug!(guid = %video.guid, post_id = %existing.id, "updated record");
                Ok(UpsertOutcome::Updated {
                    post_id: existing.id,
                })
            }
            None => {
                let post = VideoPost::new(
                    video.display_title(),
                    video.body_text(),
                    &video.guid,
                    library_id,
                    raw_metadata,
                    now,
                );
                self.videos.insert(&post).await?;
                debug!(guid = %video.guid, post_id = %post.id, "created record");
                Ok(UpsertOutcome::Created { post_id: post.id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_catalog::{create_test_pool, SqliteVideoRepository};
    use host_traits::SystemClock;
    use serde_json::json;

    async fn reconciler() -> (Reconciler, Arc<SqliteVideoRepository>) {
        let pool = create_test_pool().await.unwrap();
        let videos = Arc::new(SqliteVideoRepository::new(pool));
        let reconciler = Reconciler::new(videos.clone(), Arc::new(SystemClock));
        (reconciler, videos)
    }

    fn video(guid: &str) -> RemoteVideo {
        RemoteVideo {
            guid: guid.to_string(),
            title: Some("Onboarding".to_string()),
            description: Some("Full walkthrough".to_string()),
            summary: Some("Walkthrough".to_string()),
            metadata: json!({ "guid": guid, "length": 120 }),
        }
    }

    #[tokio::test]
    async fn test_creates_then_updates() {
        let (reconciler, videos) = reconciler().await;

        let outcome = reconciler.upsert("lib", &video("g1")).await.unwrap();
        let post_id = match outcome {
            UpsertOutcome::Created { post_id } => post_id,
            other => panic!("expected Created, got {:?}", other),
        };

        let stored = videos.find_by_id(&post_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Onboarding");
        assert_eq!(stored.body, "Full walkthrough");
        assert_eq!(stored.status, "published");

        let mut changed = video("g1");
        changed.title = Some("Onboarding v2".to_string());
        let outcome = reconciler.upsert("lib", &changed).await.unwrap();
        assert_eq!(
            outcome,
            UpsertOutcome::Updated {
                post_id: post_id.clone()
            }
        );

        let stored = videos.find_by_id(&post_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Onboarding v2");
        assert_eq!(videos.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_title_falls_back_to_guid() {
        let (reconciler, videos) = reconciler().await;

        let mut untitled = video("g2");
        untitled.title = None;
        let outcome = reconciler.upsert("lib", &untitled).await.unwrap();

        let stored = videos.find_by_id(outcome.post_id()).await.unwrap().unwrap();
        assert_eq!(stored.title, "g2");
    }

    #[tokio::test]
    async fn test_body_falls_back_to_summary() {
        let (reconciler, videos) = reconciler().await;

        let mut v = video("g3");
        v.description = None;
        let outcome = reconciler.upsert("lib", &v).await.unwrap();

        let stored = videos.find_by_id(outcome.post_id()).await.unwrap().unwrap();
        assert_eq!(stored.body, "Walkthrough");
    }

    #[tokio::test]
    async fn test_metadata_stored_verbatim() {
        let (reconciler, videos) = reconciler().await;

        let outcome = reconciler.upsert("lib", &video("g4")).await.unwrap();
        let stored = videos.find_by_id(outcome.post_id()).await.unwrap().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&stored.raw_metadata).unwrap();
        assert_eq!(parsed["length"], 120);
    }
}
