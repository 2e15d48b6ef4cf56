//! Sync engine error types

use thiserror::Error;

/// Errors produced while running a sync
#[derive(Debug, Error)]
pub enum SyncError {
    /// Required settings are absent or blank
    #[error("api key and library id must be configured")]
    MissingConfig,

    /// Scoped key resolution failed
    #[error("credential resolution failed: {0}")]
    Credential(String),

    /// Remote listing call failed mid-run
    #[error("remote catalog error: {0}")]
    Remote(String),

    /// A sync for this library is already running
    #[error("sync already in progress for library {library_id}")]
    SyncInProgress {
        /// The library whose run lock is held
        library_id: String,
    },

    /// Local catalog storage error
    #[error("catalog store error: {0}")]
    Store(#[from] core_catalog::CatalogError),

    /// Settings store error
    #[error("settings error: {0}")]
    Settings(String),

    /// Attempted an invalid run phase transition
    #[error("invalid phase transition from {from} to {to}")]
    InvalidTransition {
        /// Current phase
        from: String,
        /// Requested phase
        to: String,
    },
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
