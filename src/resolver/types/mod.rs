mod media;
mod metadata;
mod provider;

pub use media::{MediaIdentity, MediaKind, MediaSummary, RecommendationPage, year_from_date};
pub use metadata::{
    ACTIVE_TRANSLATION_LANGUAGE, Rating, RawVideo, Thumbnails, Translation, VideoCategory,
    VideoDetails, active_translation, find_translation,
};
pub use provider::{NavigationTarget, ProviderCriteria, ProviderOption, WatchRequest};
