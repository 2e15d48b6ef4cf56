//! # Sync Engine
//!
//! Orchestrates one full mirror pass of the configured remote library into
//! the local catalog.
//!
//! ## Workflow
//!
//! 1. Read configuration from the settings store (fresh every run)
//! 2. Validate that the account key and library id are present
//! 3. Take the per-library run lock, or bail with `SyncInProgress`
//! 4. Resolve the library-scoped key, cached across runs
//! 5. Page through the remote listing, upserting each video and
//!    sideloading its thumbnail best-effort
//! 6. Sweep orphaned records
//! 7. Persist the last-sync timestamp and return a [`SyncReport`]
//!
//! A failure mid-run keeps all completed page upserts; there is no
//! rollback. The last-sync timestamp is only written on success.

use crate::credentials::CredentialResolver;
use crate::orphans::OrphanCollector;
use crate::pager::VideoPager;
use crate::reconciler::Reconciler;
use crate::run::{SyncPhase, SyncReport, SyncRun};
use crate::thumbnails::ThumbnailFetcher;
use crate::{keys, Result, SyncError};
use core_catalog::{ThumbnailRepository, VideoRepository};
use host_traits::{CatalogProvider, Clock, SettingsStore};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Coordinates the full sync pipeline against one remote account.
pub struct SyncEngine {
    catalog: Arc<dyn CatalogProvider>,
    settings: Arc<dyn SettingsStore>,
    videos: Arc<dyn VideoRepository>,
    resolver: CredentialResolver,
    reconciler: Reconciler,
    thumbnails: ThumbnailFetcher,
    orphans: OrphanCollector,
    clock: Arc<dyn Clock>,
    active: Mutex<HashSet<String>>,
}

impl SyncEngine {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        settings: Arc<dyn SettingsStore>,
        videos: Arc<dyn VideoRepository>,
        thumbnails: Arc<dyn ThumbnailRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver: CredentialResolver::new(catalog.clone(), settings.clone()),
            reconciler: Reconciler::new(videos.clone(), clock.clone()),
            thumbnails: ThumbnailFetcher::new(catalog.clone(), thumbnails, clock.clone()),
            orphans: OrphanCollector::new(videos.clone()),
            catalog,
            settings,
            videos,
            clock,
            active: Mutex::new(HashSet::new()),
        }
    }

    /// Run one full sync of the configured library.
    ///
    /// # Errors
    ///
    /// - `MissingConfig` when the account key or library id is absent
    /// - `SyncInProgress` when a run for the same library is already active
    /// - `Credential` when scoped key resolution fails
    /// - `Remote` when a listing page fails mid-run; completed upserts stay
    #[instrument(skip(self))]
    pub async fn run_sync(&self) -> Result<SyncReport> {
        let mut run = SyncRun::new(String::new());
        run.advance(SyncPhase::ValidatingConfig)?;

        // Settings are re-read on every run so config changes apply
        // without a restart.
        let primary_key = self.required_setting(keys::API_KEY).await?;
        let library_id = self.required_setting(keys::LIBRARY_ID).await?;
        run.library_id = library_id.clone();

        {
            let mut active = self.active.lock().await;
            if !active.insert(library_id.clone()) {
                debug!(library_id, "run lock already held");
                return Err(SyncError::SyncInProgress { library_id });
            }
        }

        let result = self.run_locked(&mut run, &primary_key, &library_id).await;

        // Release the lock whatever happened inside.
        self.active.lock().await.remove(&library_id);

        match result {
            Ok(report) => Ok(report),
            Err(e) => {
                run.fail();
                warn!(library_id, error = %e, "sync run failed");
                Err(e)
            }
        }
    }

    async fn run_locked(
        &self,
        run: &mut SyncRun,
        primary_key: &str,
        library_id: &str,
    ) -> Result<SyncReport> {
        run.advance(SyncPhase::ResolvingCredentials)?;
        let scoped_key = self.resolver.resolve(primary_key, library_id).await?;

        let mut pager = VideoPager::new(self.catalog.clone(), library_id, &scoped_key);

        run.advance(SyncPhase::Paginating)?;
        while let Some(page) = pager.next_page().await? {
            run.pages_fetched += 1;

            if page.items.is_empty() {
                continue;
            }

            run.advance(SyncPhase::Reconciling)?;
            for video in &page.items {
                if video.guid.is_empty() {
                    debug!("skipping remote record without guid");
                    continue;
                }

                let outcome = self.reconciler.upsert(library_id, video).await?;
                match &outcome {
                    crate::reconciler::UpsertOutcome::Created { .. } => run.created += 1,
                    crate::reconciler::UpsertOutcome::Updated { .. } => run.updated += 1,
                }
                run.mark_processed(&video.guid);

                self.thumbnails
                    .ensure(library_id, &video.guid, outcome.post_id())
                    .await;
            }
            run.advance(SyncPhase::Paginating)?;
        }

        run.advance(SyncPhase::CollectingOrphans)?;
        run.deleted = self.orphans.sweep(&run.processed_guids).await?;

        run.advance(SyncPhase::Done)?;
        let completed_at = self.clock.now();
        self.settings
            .set_string(keys::LAST_SYNC, &completed_at.to_rfc3339())
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))?;

        let report = run.report(completed_at);
        info!(
            library_id,
            pages = report.pages_fetched,
            created = report.created,
            updated = report.updated,
            deleted = report.deleted,
            "{}",
            report.summary()
        );
        Ok(report)
    }

    /// Whether a sync for `library_id` is currently running
    pub async fn is_sync_active(&self, library_id: &str) -> bool {
        self.active.lock().await.contains(library_id)
    }

    /// Total records in the local catalog
    pub async fn record_count(&self) -> Result<i64> {
        Ok(self.videos.count().await?)
    }

    /// RFC 3339 timestamp of the last successful sync, if any
    pub async fn last_sync(&self) -> Result<Option<String>> {
        self.settings
            .get_string(keys::LAST_SYNC)
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))
    }

    async fn required_setting(&self, key: &str) -> Result<String> {
        let value = self
            .settings
            .get_string(key)
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))?;
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(SyncError::MissingConfig),
        }
    }
}
