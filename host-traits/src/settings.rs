//! Key-Value Settings Storage
//!
//! The host's persisted configuration store: credentials, the selected
//! library, and the last successful sync timestamp all live here. Shared
//! mutable state with last-write-wins semantics; no transactions required.

use async_trait::async_trait;

use crate::error::Result;

/// Key-value settings storage trait
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Store a string value, replacing any previous value
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a string value
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Delete a setting; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a setting exists
    async fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_string(key).await?.is_some())
    }
}
