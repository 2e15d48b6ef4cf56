//! Periodic sync scheduling
//!
//! Runs the engine on a fixed cadence. A tick that lands while the
//! previous run is still going is skipped via the engine's run lock.

use crate::{SyncEngine, SyncError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Default cadence between scheduled syncs
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Spawn a background task that syncs every `interval`.
///
/// The first tick fires immediately. Failures are logged and the loop
/// keeps going; abort the returned handle to stop it.
pub fn spawn_periodic_sync(engine: Arc<SyncEngine>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match engine.run_sync().await {
                Ok(report) => {
                    info!("{}", report.summary());
                }
                Err(SyncError::SyncInProgress { library_id }) => {
                    debug!(library_id, "previous run still active, skipping tick");
                }
                Err(SyncError::MissingConfig) => {
                    debug!("sync not configured, skipping tick");
                }
                Err(e) => {
                    error!(error = %e, "scheduled sync failed");
                }
            }
        }
    })
}
