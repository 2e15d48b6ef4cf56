//! Shared test doubles for unit tests

use async_trait::async_trait;
use bytes::Bytes;
use host_traits::{
    CatalogProvider, HostError, RemoteLibrary, RemoteVideo, SettingsStore, VideoPage,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory settings store
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn set_string(&self, key: &str, value: &str) -> host_traits::Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_string(&self, key: &str) -> host_traits::Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> host_traits::Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Catalog provider that serves canned libraries and a scripted sequence
/// of page responses, recording the calls it receives.
pub struct ScriptedCatalog {
    libraries: Vec<RemoteLibrary>,
    pages: Mutex<VecDeque<host_traits::Result<VideoPage>>>,
    thumbnail_failures: Mutex<Vec<String>>,
    library_calls: AtomicUsize,
    video_calls: Mutex<Vec<u32>>,
    thumbnail_calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn new(libraries: Vec<RemoteLibrary>) -> Self {
        Self {
            libraries,
            pages: Mutex::new(VecDeque::new()),
            thumbnail_failures: Mutex::new(Vec::new()),
            library_calls: AtomicUsize::new(0),
            video_calls: Mutex::new(Vec::new()),
            thumbnail_calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next page response
    pub fn push_page(&self, page: host_traits::Result<VideoPage>) {
        self.pages.lock().unwrap().push_back(page);
    }

    /// Make thumbnail fetches for this guid fail
    pub fn fail_thumbnail(&self, guid: &str) {
        self.thumbnail_failures.lock().unwrap().push(guid.to_string());
    }

    pub fn library_calls(&self) -> usize {
        self.library_calls.load(Ordering::SeqCst)
    }

    /// Page numbers requested so far
    pub fn requested_pages(&self) -> Vec<u32> {
        self.video_calls.lock().unwrap().clone()
    }

    /// Guids whose thumbnails were fetched
    pub fn thumbnail_calls(&self) -> Vec<String> {
        self.thumbnail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogProvider for ScriptedCatalog {
    async fn list_libraries(&self, _primary_key: &str) -> host_traits::Result<Vec<RemoteLibrary>> {
        self.library_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.libraries.clone())
    }

    async fn list_videos(
        &self,
        _library_id: &str,
        _scoped_key: &str,
        page: u32,
        _page_size: u32,
    ) -> host_traits::Result<VideoPage> {
        self.video_calls.lock().unwrap().push(page);
        match self.pages.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(VideoPage::default()),
        }
    }

    async fn fetch_thumbnail(&self, _library_id: &str, guid: &str) -> host_traits::Result<Bytes> {
        self.thumbnail_calls.lock().unwrap().push(guid.to_string());
        if self.thumbnail_failures.lock().unwrap().iter().any(|g| g == guid) {
            return Err(HostError::OperationFailed(format!(
                "thumbnail fetch failed for {}",
                guid
            )));
        }
        Ok(Bytes::from_static(&[0xff, 0xd8, 0xff]))
    }
}

/// A remote video with the given guid and title
pub fn remote_video(guid: &str, title: &str) -> RemoteVideo {
    RemoteVideo {
        guid: guid.to_string(),
        title: Some(title.to_string()),
        description: None,
        summary: None,
        metadata: serde_json::json!({ "guid": guid, "title": title }),
    }
}

/// A full page reporting the given pagination counts
pub fn page(items: Vec<RemoteVideo>, total: i64, current: i64, per_page: i64) -> VideoPage {
    VideoPage {
        items,
        total_items: Some(total),
        current_page: Some(current),
        items_per_page: Some(per_page),
    }
}
