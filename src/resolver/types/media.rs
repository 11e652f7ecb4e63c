use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of title being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Anime,
}

impl MediaKind {
    /// Parse a kind from a route segment or query value
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Some(Self::Movie),
            "tv" | "tvshow" | "tv-shows" | "series" => Some(Self::Tv),
            "anime" => Some(Self::Anime),
            _ => None,
        }
    }

    /// Path segment used by the catalog API
    #[must_use]
    pub const fn catalog_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv | Self::Anime => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Tv => write!(f, "tv"),
            Self::Anime => write!(f, "anime"),
        }
    }
}

/// Resolved identity of a title, created per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaIdentity {
    /// Catalog ID
    pub id: u64,
    /// Media kind
    pub kind: MediaKind,
    /// Title in the requested locale, when the catalog supplied one
    pub title: Option<String>,
    /// Original/native title
    pub original_title: String,
    /// Original language code (e.g., "en", "fr")
    pub original_language: String,
    /// Release or first-air year
    pub release_year: Option<i32>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub genres: Vec<String>,
    /// Catalog vote average (0-10 scale)
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    /// Runtime in minutes
    pub runtime: Option<i32>,
    /// Number of seasons (tv only)
    pub season_count: Option<i32>,
}

impl MediaIdentity {
    /// Create an identity with required fields
    pub fn new(
        id: u64,
        kind: MediaKind,
        original_title: impl Into<String>,
        original_language: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            title: None,
            original_title: original_title.into(),
            original_language: original_language.into(),
            release_year: None,
            overview: None,
            poster_url: None,
            backdrop_url: None,
            genres: Vec::new(),
            vote_average: None,
            vote_count: None,
            runtime: None,
            season_count: None,
        }
    }

    /// Builder pattern: set localized title
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Builder pattern: set release year
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.release_year = year;
        self
    }

    /// Title as delivered by the catalog: localized if present, else original
    #[must_use]
    pub fn raw_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.original_title)
    }
}

/// Summary entry of a recommendation list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSummary {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_year: Option<i32>,
    pub vote_average: Option<f64>,
    pub genre_ids: Vec<i64>,
}

/// One page of recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationPage {
    /// 1-indexed page number
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub items: Vec<MediaSummary>,
}

/// Extract the year from a catalog date string (YYYY-MM-DD)
pub fn year_from_date(date: Option<&str>) -> Option<i32> {
    let date = date?.trim();
    if date.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.year())
        .ok()
        .or_else(|| date.split('-').next().and_then(|y| y.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parse() {
        assert_eq!(MediaKind::parse("movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::parse("TV"), Some(MediaKind::Tv));
        assert_eq!(MediaKind::parse("tv-shows"), Some(MediaKind::Tv));
        assert_eq!(MediaKind::parse("anime"), Some(MediaKind::Anime));
        assert_eq!(MediaKind::parse("book"), None);
    }

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date(Some("1999-03-31")), Some(1999));
        assert_eq!(year_from_date(Some("2021")), Some(2021));
        assert_eq!(year_from_date(Some("")), None);
        assert_eq!(year_from_date(None), None);
    }

    #[test]
    fn test_raw_title_falls_back_to_original() {
        let identity = MediaIdentity::new(1, MediaKind::Movie, "Amélie", "fr");
        assert_eq!(identity.raw_title(), "Amélie");

        let identity = identity.with_title(Some("Amelie".to_string()));
        assert_eq!(identity.raw_title(), "Amelie");
    }
}
