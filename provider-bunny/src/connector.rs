//! Bunny Stream API connector implementation
//!
//! Implements the `CatalogProvider` trait for the Bunny.net Stream API.

use async_trait::async_trait;
use bytes::Bytes;
use host_traits::catalog::{CatalogProvider, RemoteLibrary, RemoteVideo, VideoPage};
use host_traits::http::{HttpClient, HttpRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::{BunnyError, Result};
use crate::types::{BunnyLibrary, BunnyVideo, BunnyVideoPage};

/// Account-level API base URL
const ACCOUNT_API_BASE: &str = "https://api.bunny.net";

/// Library-scoped video API base URL
const VIDEO_API_BASE: &str = "https://video.bunnycdn.com";

/// Thumbnail CDN base URL (unauthenticated)
const THUMBNAIL_CDN_BASE: &str = "https://thumbnail.bunnycdn.com";

/// Per-call timeout for the metadata endpoints
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed listing order: newest first by creation date
const ORDER_BY: &str = "date";

/// Bunny Stream API connector
///
/// Implements `CatalogProvider` over an injected [`HttpClient`]. Each call
/// is a single attempt with a bounded timeout; there is no retry logic here
/// by design, since the sync engine aborts the run on listing failures.
///
/// # Example
///
/// ```ignore
/// use provider_bunny::BunnyConnector;
/// use host_traits::catalog::CatalogProvider;
///
/// let connector = BunnyConnector::new(http_client);
/// let libraries = connector.list_libraries(&primary_key).await?;
/// ```
pub struct BunnyConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,
}

impl BunnyConnector {
    /// Create a new Bunny Stream connector
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Deterministic thumbnail URL for a video
    pub fn thumbnail_url(library_id: &str, guid: &str) -> String {
        format!(
            "{}/{}/{}.jpg",
            THUMBNAIL_CDN_BASE,
            urlencoding::encode(library_id),
            urlencoding::encode(guid)
        )
    }

    /// Convert a wire-format video into the neutral record, keeping the
    /// full payload as metadata
    fn convert_video(video: BunnyVideo) -> Result<RemoteVideo> {
        let metadata = serde_json::to_value(&video)
            .map_err(|e| BunnyError::Parse(format!("Failed to re-serialize video: {}", e)))?;

        Ok(RemoteVideo {
            guid: video.guid.unwrap_or_default(),
            title: video.title,
            description: video.description,
            summary: video.summary,
            metadata,
        })
    }

    /// Execute an authenticated GET and check for a success status
    async fn get_checked(&self, url: String, access_key: &str) -> Result<Bytes> {
        let request = HttpRequest::get(url)
            .access_key(access_key)
            .header("accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(BunnyError::Api {
                status: response.status,
                body: response.text(),
            });
        }

        Ok(response.body)
    }
}

#[async_trait]
impl CatalogProvider for BunnyConnector {
    #[instrument(skip(self, primary_key))]
    async fn list_libraries(
        &self,
        primary_key: &str,
    ) -> host_traits::error::Result<Vec<RemoteLibrary>> {
        debug!("Listing video libraries");

        let url = format!("{}/videolibrary", ACCOUNT_API_BASE);
        let body = self
            .get_checked(url, primary_key)
            .await
            .map_err(host_traits::error::HostError::from)?;

        let libraries: Vec<BunnyLibrary> = serde_json::from_slice(&body).map_err(|e| {
            host_traits::error::HostError::from(BunnyError::Parse(format!(
                "Failed to parse library list: {}",
                e
            )))
        })?;

        info!("Listed {} video libraries", libraries.len());

        Ok(libraries
            .into_iter()
            .map(|lib| RemoteLibrary {
                id: lib.id_string(),
                name: lib.name,
                scoped_key: lib.api_key,
            })
            .collect())
    }

    #[instrument(skip(self, scoped_key), fields(library_id = %library_id, page = page))]
    async fn list_videos(
        &self,
        library_id: &str,
        scoped_key: &str,
        page: u32,
        page_size: u32,
    ) -> host_traits::error::Result<VideoPage> {
        debug!("Fetching video listing page");

        let url = format!(
            "{}/library/{}/videos?page={}&itemsPerPage={}&orderBy={}",
            VIDEO_API_BASE,
            urlencoding::encode(library_id),
            page,
            page_size,
            ORDER_BY
        );

        let body = self
            .get_checked(url, scoped_key)
            .await
            .map_err(host_traits::error::HostError::from)?;

        let wire_page: BunnyVideoPage = serde_json::from_slice(&body).map_err(|e| {
            host_traits::error::HostError::from(BunnyError::Parse(format!(
                "Failed to parse video listing: {}",
                e
            )))
        })?;

        let mut items = Vec::with_capacity(wire_page.items.len());
        for video in wire_page.items {
            items.push(Self::convert_video(video).map_err(host_traits::error::HostError::from)?);
        }

        info!(
            items = items.len(),
            total = ?wire_page.total_items,
            "Fetched video listing page"
        );

        Ok(VideoPage {
            items,
            total_items: wire_page.total_items,
            current_page: wire_page.current_page,
            items_per_page: wire_page.items_per_page,
        })
    }

    #[instrument(skip(self), fields(library_id = %library_id, guid = %guid))]
    async fn fetch_thumbnail(
        &self,
        library_id: &str,
        guid: &str,
    ) -> host_traits::error::Result<Bytes> {
        // Unauthenticated CDN fetch; client default timeout applies.
        let request = HttpRequest::get(Self::thumbnail_url(library_id, guid));
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(host_traits::error::HostError::from(BunnyError::Api {
                status: response.status,
                body: response.text(),
            }));
        }

        debug!(bytes = response.body.len(), "Downloaded thumbnail");
        Ok(response.body)
    }
}
