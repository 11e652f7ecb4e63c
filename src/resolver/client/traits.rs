use crate::resolver::{
    Result,
    types::{
        MediaIdentity, MediaKind, ProviderCriteria, ProviderOption, Rating, RawVideo,
        RecommendationPage, Translation, VideoDetails,
    },
};
use async_trait::async_trait;

/// Primary metadata source for titles, seasons and recommendations
///
/// `Ok(None)` means the catalog has no such entry; `Err` is a transport or
/// upstream failure.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Title detail in the requested locale
    ///
    /// A catalog without coverage for `kind` answers `Ok(None)`. TMDB has
    /// no anime entries, so anime detail needs an anime-aware catalog.
    async fn get_detail(&self, kind: MediaKind, id: u64, locale: &str)
    -> Result<Option<MediaIdentity>>;

    /// Recommendation page; `page = None` lets the catalog pick its default
    async fn get_recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        page: Option<u32>,
        locale: &str,
    ) -> Result<Option<RecommendationPage>>;

    /// Videos attached to a single tv season
    async fn get_season_videos(
        &self,
        tv_id: u64,
        season: u32,
        locale: &str,
    ) -> Result<Option<Vec<RawVideo>>>;

    /// Videos attached to a title
    async fn get_videos(
        &self,
        kind: MediaKind,
        id: u64,
        locale: &str,
    ) -> Result<Option<Vec<RawVideo>>>;

    /// External (IMDB) ID used to look up ratings
    async fn get_cross_reference_id(&self, kind: MediaKind, id: u64) -> Result<Option<String>>;
}

/// Source of localized title/overview variants
#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn get_translations(&self, kind: MediaKind, id: u64) -> Result<Vec<Translation>>;
}

/// Independent rating source keyed by cross-reference ID
#[async_trait]
pub trait RatingClient: Send + Sync {
    async fn get_rating(&self, cross_reference_id: &str) -> Result<Option<Rating>>;
}

/// Video platform used to enrich catalog video keys
#[async_trait]
pub trait VideoPlatformClient: Send + Sync {
    /// `keys` is a comma-joined list of platform video IDs
    async fn get_video_details(&self, keys: &str) -> Result<Vec<VideoDetails>>;
}

/// Service that finds streaming sources for a title
#[async_trait]
pub trait ProviderDiscovery: Send + Sync {
    async fn find_providers(&self, criteria: &ProviderCriteria) -> Result<Vec<ProviderOption>>;
}
