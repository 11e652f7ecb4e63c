use crate::resolver::{
    Result,
    activation::{FetchTracker, Generation},
    client::VideoPlatformClient,
    types::{RawVideo, VideoCategory, VideoDetails},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Platform keys of the videos in `category`, in catalog order
pub fn classify(videos: &[RawVideo], category: VideoCategory) -> Vec<String> {
    videos
        .iter()
        .filter(|v| v.kind == category.label())
        .map(|v| v.key.clone())
        .collect()
}

/// Group videos by category; unrecognized types are dropped
pub fn partition(videos: &[RawVideo]) -> BTreeMap<VideoCategory, Vec<RawVideo>> {
    let mut groups: BTreeMap<VideoCategory, Vec<RawVideo>> = BTreeMap::new();

    for video in videos {
        match video.category() {
            Some(category) => groups.entry(category).or_default().push(video.clone()),
            None => debug!("Dropping video {} with unknown type {:?}", video.key, video.kind),
        }
    }

    groups
}

/// First video typed "Trailer", regardless of the selected category
pub fn resolve_official_trailer(videos: &[RawVideo]) -> Option<&RawVideo> {
    videos
        .iter()
        .find(|v| v.kind == VideoCategory::Trailer.label())
}

/// Catalog entry backing an enriched platform video
pub fn find_by_key<'a>(videos: &'a [RawVideo], key: &str) -> Option<&'a RawVideo> {
    videos.iter().find(|v| v.key == key)
}

/// Classifies catalog videos and enriches a category from the video platform
#[derive(Clone)]
pub struct VideoClassifier {
    platform: Option<Arc<dyn VideoPlatformClient>>,
}

impl VideoClassifier {
    pub fn new(platform: Option<Arc<dyn VideoPlatformClient>>) -> Self {
        Self { platform }
    }

    /// Enriched videos for one category
    ///
    /// No platform call is issued when the category is empty. Platform
    /// failures degrade to an empty list.
    pub async fn browse(&self, videos: &[RawVideo], category: VideoCategory) -> Vec<VideoDetails> {
        let keys = classify(videos, category);
        if keys.is_empty() {
            return Vec::new();
        }

        match self.lookup(&keys.join(",")).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Video enrichment for {} failed: {}", category, e);
                Vec::new()
            }
        }
    }

    /// Single platform lookup for comma-joined keys
    pub async fn lookup(&self, keys: &str) -> Result<Vec<VideoDetails>> {
        let Some(platform) = self.platform.as_ref() else {
            debug!("No video platform configured, skipping lookup");
            return Ok(Vec::new());
        };

        debug!("Looking up videos: {}", keys);
        platform.get_video_details(keys).await
    }
}

/// Pending platform lookup started by a category switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoActivation {
    pub generation: Generation,
    /// Comma-joined platform keys
    pub keys: String,
}

/// Category browsing state for one video list
///
/// Switching category starts a new lookup; results from a previous category
/// that arrive late are discarded.
#[derive(Debug)]
pub struct VideoBrowser {
    videos: Vec<RawVideo>,
    active: VideoCategory,
    tracker: FetchTracker<Vec<VideoDetails>>,
}

impl VideoBrowser {
    pub fn new(videos: Vec<RawVideo>) -> Self {
        Self {
            videos,
            active: VideoCategory::Trailer,
            tracker: FetchTracker::new(),
        }
    }

    /// Select a category; returns the lookup to run, if one is needed
    pub fn select(&mut self, category: VideoCategory) -> Option<VideoActivation> {
        self.active = category;
        let keys = classify(&self.videos, category);

        if keys.is_empty() {
            self.tracker.resolve_now(Vec::new());
            return None;
        }

        Some(VideoActivation {
            generation: self.tracker.begin(),
            keys: keys.join(","),
        })
    }

    /// Apply a lookup result; stale generations are ignored
    pub fn complete(&mut self, generation: Generation, result: Result<Vec<VideoDetails>>) -> bool {
        self.tracker.complete(generation, result)
    }

    /// Select and run the lookup through `classifier`
    pub async fn show(&mut self, classifier: &VideoClassifier, category: VideoCategory) {
        if let Some(activation) = self.select(category) {
            let result = classifier.lookup(&activation.keys).await;
            self.complete(activation.generation, result);
        }
    }

    #[must_use]
    pub const fn active(&self) -> VideoCategory {
        self.active
    }

    #[must_use]
    pub const fn tracker(&self) -> &FetchTracker<Vec<VideoDetails>> {
        &self.tracker
    }

    /// Videos to display; empty while loading or after a failed lookup
    pub fn displayed(&self) -> &[VideoDetails] {
        self.tracker.value().map(Vec::as_slice).unwrap_or_default()
    }

    /// Catalog entry to play for a displayed video
    pub fn playable(&self, key: &str) -> Option<&RawVideo> {
        find_by_key(&self.videos, key)
    }
}
