pub mod discovery;
pub mod imdb;
pub mod tmdb;
pub mod youtube;

mod http;
mod traits;

pub use discovery::HttpProviderDiscovery;
pub use http::HttpClient;
pub use imdb::ImdbRatingClient;
pub use tmdb::TmdbClient;
pub use traits::{
    CatalogClient, ProviderDiscovery, RatingClient, TranslationClient, VideoPlatformClient,
};
pub use youtube::YoutubeClient;
