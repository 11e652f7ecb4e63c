pub mod activation;
pub mod aggregator;
pub mod classifier;
pub mod client;
pub mod locale;
pub mod manager;
pub mod paginator;
pub mod providers;
pub mod types;


pub use activation::{FetchState, FetchTracker, Generation};
pub use aggregator::{AggregateResult, DetailAggregator};
pub use classifier::{VideoBrowser, VideoClassifier};
pub use locale::{LocaleConfig, LocaleResolver};
pub use manager::{MediaResolver, MediaResolverBuilder, SeasonVideos, TitleProviders, TitleVideos};
pub use paginator::RecommendationPaginator;
pub use providers::{ProviderResolver, ProviderSelector};
pub use types::{
    MediaIdentity, MediaKind, NavigationTarget, ProviderCriteria, ProviderOption, Rating,
    RawVideo, RecommendationPage, Translation, VideoCategory, VideoDetails, WatchRequest,
};

use crate::settings::AppConfig;
use client::{HttpProviderDiscovery, ImdbRatingClient, TmdbClient, YoutubeClient};
use std::sync::Arc;
use tracing::info;

/// Resolver result type
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Resolver error types
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Create a resolver with every upstream the configuration enables
pub fn create_default_resolver(config: &AppConfig) -> Result<MediaResolver> {
    let tmdb = Arc::new(TmdbClient::with_base_urls(
        &config.tmdb.api_key,
        &config.tmdb.base_url,
        &config.tmdb.image_base_url,
    )?);

    let mut builder = MediaResolver::builder(tmdb.clone()).with_translations(tmdb);

    if let Some(ref base_url) = config.rating.base_url {
        info!("Rating lookups enabled ({})", base_url);
        builder = builder.with_rating(Arc::new(ImdbRatingClient::new(base_url)?));
    }

    if let Some(ref api_key) = config.youtube.api_key {
        info!("Video enrichment enabled");
        builder = builder.with_video_platform(Arc::new(YoutubeClient::with_base_url(
            api_key,
            &config.youtube.base_url,
        )?));
    }

    if let Some(ref base_url) = config.discovery.base_url {
        info!("Provider discovery enabled ({})", base_url);
        builder = builder.with_discovery(Arc::new(HttpProviderDiscovery::new(base_url)?));
    }

    Ok(builder.build())
}
