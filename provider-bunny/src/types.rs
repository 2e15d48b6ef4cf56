//! Bunny Stream API response types
//!
//! Data structures for deserializing Bunny.net API responses. Video records
//! keep their unrecognized fields in a flattened map so the full remote
//! payload survives verbatim into local storage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account-level video library resource
///
/// Returned by `GET https://api.bunny.net/videolibrary`; note the
/// PascalCase field names on this endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BunnyLibrary {
    /// Library identifier (numeric on the wire, but treated as opaque)
    pub id: Value,

    /// Library display name
    #[serde(default)]
    pub name: String,

    /// Library-scoped API key for the video listing endpoint
    #[serde(default)]
    pub api_key: String,
}

impl BunnyLibrary {
    /// Library id as a plain string, without JSON quoting
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// One video in a library listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BunnyVideo {
    /// Stable video identifier; absent on malformed records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    /// Video title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Long-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Short summary; some listings populate this instead of description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Everything else the listing returned, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paginated video listing response
///
/// `GET https://video.bunnycdn.com/library/{id}/videos`. All count fields
/// are optional: the pagination predicate must observe their absence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BunnyVideoPage {
    /// Videos on this page
    #[serde(default)]
    pub items: Vec<BunnyVideo>,

    /// Total items across all pages
    #[serde(default)]
    pub total_items: Option<i64>,

    /// The page number served
    #[serde(default)]
    pub current_page: Option<i64>,

    /// Page size applied by the server
    #[serde(default)]
    pub items_per_page: Option<i64>,
}
