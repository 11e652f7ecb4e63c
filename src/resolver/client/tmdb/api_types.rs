use serde::Deserialize;

// Detail responses
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: String,
    pub original_language: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: String,
    pub original_language: String,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub number_of_seasons: Option<i32>,
    #[serde(default)]
    pub episode_run_time: Vec<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

// Recommendations
#[derive(Debug, Deserialize)]
pub struct PagedResponse<T> {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<T>,
}

/// Recommendation entry; movies carry `title`, tv shows carry `name`
#[derive(Debug, Deserialize)]
pub struct RecommendationResult {
    pub id: u64,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

// Videos
#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub results: Vec<VideoResult>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResult {
    pub key: String,
    pub name: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
    pub published_at: Option<String>,
}

// External IDs
#[derive(Debug, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
}

// Translations
#[derive(Debug, Deserialize)]
pub struct TranslationsResponse {
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TranslationEntry {
    pub iso_639_1: String,
    pub iso_3166_1: Option<String>,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub data: Option<TranslationData>,
}

#[derive(Debug, Deserialize)]
pub struct TranslationData {
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
}
