//! Library-scoped key resolution
//!
//! The account key can list libraries but not their videos; each library has
//! its own scoped key. The resolver caches the scoped key in settings so
//! subsequent runs skip the account-level call, and invalidates the cache
//! when the configured library changes.

use crate::{keys, Result, SyncError};
use host_traits::{CatalogProvider, SettingsStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Resolves and caches the scoped access key for one library.
pub struct CredentialResolver {
    catalog: Arc<dyn CatalogProvider>,
    settings: Arc<dyn SettingsStore>,
}

impl CredentialResolver {
    pub fn new(catalog: Arc<dyn CatalogProvider>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { catalog, settings }
    }

    /// Return the scoped key for `library_id`, resolving it remotely if the
    /// cache is empty or belongs to a different library.
    ///
    /// A freshly resolved key is persisted before this returns, so a later
    /// failure in the same run does not discard it.
    ///
    /// # Errors
    ///
    /// Returns `Credential` if the account call fails or the library is not
    /// on the account.
    #[instrument(skip(self, primary_key), fields(library_id = %library_id))]
    pub async fn resolve(&self, primary_key: &str, library_id: &str) -> Result<String> {
        let cached = self
            .settings
            .get_string(keys::STREAM_API_KEY)
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))?;
        let cached_for = self
            .settings
            .get_string(keys::STREAM_KEY_LIBRARY_ID)
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))?;

        if let Some(key) = cached {
            if !key.is_empty() && cached_for.as_deref() == Some(library_id) {
                debug!("using cached scoped key");
                return Ok(key);
            }
        }

        info!("resolving scoped key from account");
        let libraries = self
            .catalog
            .list_libraries(primary_key)
            .await
            .map_err(|e| SyncError::Credential(e.to_string()))?;

        let library = libraries
            .into_iter()
            .find(|lib| lib.id == library_id)
            .ok_or_else(|| {
                SyncError::Credential(format!("library {} not found on account", library_id))
            })?;

        self.settings
            .set_string(keys::STREAM_API_KEY, &library.scoped_key)
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))?;
        self.settings
            .set_string(keys::STREAM_KEY_LIBRARY_ID, library_id)
            .await
            .map_err(|e| SyncError::Settings(e.to_string()))?;

        Ok(library.scoped_key)
    }
}
