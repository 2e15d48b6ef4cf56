//! Settings keys used by the sync engine

/// Account-level API key, entered by the operator
pub const API_KEY: &str = "bunny_api_key";

/// Library to mirror, entered by the operator
pub const LIBRARY_ID: &str = "bunny_library_id";

/// Cached library-scoped access key, resolved from the account key
pub const STREAM_API_KEY: &str = "bunny_stream_api_key";

/// Library the cached scoped key belongs to. When this no longer matches
/// the configured library, the cached key is stale and must be re-resolved.
pub const STREAM_KEY_LIBRARY_ID: &str = "bunny_stream_key_library_id";

/// RFC 3339 timestamp of the last successful sync
pub const LAST_SYNC: &str = "bunny_last_sync";
