use crate::resolver::{
    Result, ResolverError,
    aggregator::{AggregateResult, DetailAggregator},
    classifier::{self, VideoClassifier},
    client::{CatalogClient, ProviderDiscovery, RatingClient, TranslationClient, VideoPlatformClient},
    paginator::RecommendationPaginator,
    providers::{self, ProviderResolver},
    types::{
        MediaKind, NavigationTarget, ProviderCriteria, ProviderOption, RawVideo,
        RecommendationPage, VideoCategory, VideoDetails, WatchRequest,
    },
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Videos of a title with its official trailer resolved
#[derive(Debug, Clone, Serialize)]
pub struct TitleVideos {
    pub videos: Vec<RawVideo>,
    pub official_trailer: Option<RawVideo>,
}

/// Season videos with one category enriched
#[derive(Debug, Clone, Serialize)]
pub struct SeasonVideos {
    pub videos: Vec<RawVideo>,
    /// Number of videos per recognized category
    pub categories: BTreeMap<VideoCategory, usize>,
    pub category: VideoCategory,
    pub enriched: Vec<VideoDetails>,
}

/// Streaming sources found for a catalog title
#[derive(Debug, Clone, Serialize)]
pub struct TitleProviders {
    /// Query that was sent to provider discovery
    pub criteria: ProviderCriteria,
    pub providers: Vec<ProviderOption>,
}

/// Entry point wiring the upstream clients into the resolution pipeline
pub struct MediaResolver {
    catalog: Arc<dyn CatalogClient>,
    aggregator: DetailAggregator,
    classifier: VideoClassifier,
    providers: ProviderResolver,
    paginator: RecommendationPaginator,
}

impl MediaResolver {
    /// Build a resolver; only the catalog is mandatory
    pub fn builder(catalog: Arc<dyn CatalogClient>) -> MediaResolverBuilder {
        MediaResolverBuilder {
            catalog,
            translations: None,
            rating: None,
            video_platform: None,
            discovery: None,
        }
    }

    /// Detail with conditional translations and rating
    pub async fn aggregate(&self, kind: MediaKind, id: u64, locale: &str) -> Result<AggregateResult> {
        self.aggregator.aggregate(kind, id, locale).await
    }

    /// One page of recommendations
    pub async fn recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        page: Option<i64>,
        locale: &str,
    ) -> Result<RecommendationPage> {
        self.paginator.recommendations(kind, id, page, locale).await
    }

    /// Title videos plus the official trailer
    pub async fn title_videos(&self, kind: MediaKind, id: u64, locale: &str) -> Result<TitleVideos> {
        let videos = self
            .catalog
            .get_videos(kind, id, locale)
            .await?
            .ok_or_else(|| ResolverError::NotFound(format!("videos for {kind} {id}")))?;

        let official_trailer = classifier::resolve_official_trailer(&videos).cloned();

        Ok(TitleVideos {
            videos,
            official_trailer,
        })
    }

    /// Season videos with `category` enriched from the video platform
    pub async fn season_videos(
        &self,
        tv_id: u64,
        season: u32,
        category: VideoCategory,
        locale: &str,
    ) -> Result<SeasonVideos> {
        info!("Season videos for tv {} season {} ({})", tv_id, season, category);

        let videos = self
            .catalog
            .get_season_videos(tv_id, season, locale)
            .await?
            .ok_or_else(|| {
                ResolverError::NotFound(format!("videos for tv {tv_id} season {season}"))
            })?;

        let categories = classifier::partition(&videos)
            .into_iter()
            .map(|(category, group)| (category, group.len()))
            .collect();
        let enriched = self.classifier.browse(&videos, category).await;

        Ok(SeasonVideos {
            videos,
            categories,
            category,
            enriched,
        })
    }

    /// Enriched details for comma-joined platform keys
    pub async fn video_details(&self, keys: &str) -> Vec<VideoDetails> {
        if keys.trim().is_empty() {
            return Vec::new();
        }

        self.classifier.lookup(keys).await.unwrap_or_else(|e| {
            warn!("Video lookup for {} failed: {}", keys, e);
            Vec::new()
        })
    }

    /// Streaming sources for the criteria; failures yield none
    pub async fn providers(&self, criteria: &ProviderCriteria) -> Vec<ProviderOption> {
        self.providers.resolve(criteria).await
    }

    /// Streaming sources for a catalog title
    ///
    /// The search title is picked from the resolved detail and its English
    /// translation. Tv lookups need a season, anime lookups an episode
    /// reference.
    pub async fn providers_for(
        &self,
        kind: MediaKind,
        id: u64,
        locale: &str,
        season: Option<u32>,
        episode_id: Option<&str>,
    ) -> Result<TitleProviders> {
        match kind {
            MediaKind::Tv if season.is_none() => {
                return Err(ResolverError::InvalidRequest(format!(
                    "season is required for tv {id}"
                )));
            }
            MediaKind::Anime if episode_id.is_none() => {
                return Err(ResolverError::InvalidRequest(format!(
                    "episode reference is required for anime {id}"
                )));
            }
            _ => {}
        }

        let aggregate = self.aggregate(kind, id, locale).await?;
        let detail = &aggregate.detail;
        let translations = aggregate.translations.as_deref().unwrap_or_default();

        let criteria = match (kind, season, episode_id) {
            (MediaKind::Tv, Some(season), _) => providers::tv_criteria(detail, translations, season),
            (MediaKind::Anime, _, Some(episode_id)) => providers::anime_criteria(detail, episode_id),
            _ => providers::movie_criteria(detail, translations),
        };

        let providers = self.providers.resolve(&criteria).await;

        Ok(TitleProviders {
            criteria,
            providers,
        })
    }

    /// Navigation target for a chosen provider
    pub fn watch_target(&self, request: &WatchRequest, option: &ProviderOption) -> NavigationTarget {
        info!("Watch target for {} via {}", request.kind(), option.provider);
        providers::build_watch_target(request, option)
    }
}

/// Builder for [`MediaResolver`]
pub struct MediaResolverBuilder {
    catalog: Arc<dyn CatalogClient>,
    translations: Option<Arc<dyn TranslationClient>>,
    rating: Option<Arc<dyn RatingClient>>,
    video_platform: Option<Arc<dyn VideoPlatformClient>>,
    discovery: Option<Arc<dyn ProviderDiscovery>>,
}

impl MediaResolverBuilder {
    pub fn with_translations(mut self, client: Arc<dyn TranslationClient>) -> Self {
        self.translations = Some(client);
        self
    }

    pub fn with_rating(mut self, client: Arc<dyn RatingClient>) -> Self {
        self.rating = Some(client);
        self
    }

    pub fn with_video_platform(mut self, client: Arc<dyn VideoPlatformClient>) -> Self {
        self.video_platform = Some(client);
        self
    }

    pub fn with_discovery(mut self, client: Arc<dyn ProviderDiscovery>) -> Self {
        self.discovery = Some(client);
        self
    }

    pub fn build(self) -> MediaResolver {
        MediaResolver {
            aggregator: DetailAggregator::new(
                Arc::clone(&self.catalog),
                self.translations,
                self.rating,
            ),
            classifier: VideoClassifier::new(self.video_platform),
            providers: ProviderResolver::new(self.discovery),
            paginator: RecommendationPaginator::new(Arc::clone(&self.catalog)),
            catalog: self.catalog,
        }
    }
}
