use super::api_types::{
    ExternalIds, MovieDetails, PagedResponse, RecommendationResult, TranslationEntry,
    TranslationsResponse, TvDetails, VideoResult, VideosResponse,
};
use crate::resolver::{
    Result,
    client::{CatalogClient, HttpClient, TranslationClient},
    types::{
        MediaIdentity, MediaKind, MediaSummary, RawVideo, RecommendationPage, Translation,
        year_from_date,
    },
};
use async_trait::async_trait;
use tracing::debug;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// TMDB v3 client serving as catalog and translation source
pub struct TmdbClient {
    client: HttpClient,
    api_key: String,
    image_base: String,
}

impl TmdbClient {
    pub fn with_base_urls(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        image_base: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url)?,
            api_key: api_key.into(),
            image_base: image_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/{size}{p}", self.image_base))
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        params.extend_from_slice(extra_params);

        self.client.get_optional(endpoint, &params).await
    }

    fn movie_to_identity(&self, movie: MovieDetails) -> MediaIdentity {
        let year = year_from_date(movie.release_date.as_deref());

        MediaIdentity {
            poster_url: self.image_url(movie.poster_path.as_deref(), "w500"),
            backdrop_url: self.image_url(movie.backdrop_path.as_deref(), "original"),
            overview: movie.overview,
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            runtime: movie.runtime,
            ..MediaIdentity::new(
                movie.id,
                MediaKind::Movie,
                movie.original_title,
                movie.original_language,
            )
            .with_title(non_empty(movie.title))
            .with_year(year)
        }
    }

    fn tv_to_identity(&self, tv: TvDetails) -> MediaIdentity {
        let year = year_from_date(tv.first_air_date.as_deref());

        MediaIdentity {
            poster_url: self.image_url(tv.poster_path.as_deref(), "w500"),
            backdrop_url: self.image_url(tv.backdrop_path.as_deref(), "original"),
            overview: tv.overview,
            genres: tv.genres.into_iter().map(|g| g.name).collect(),
            vote_average: tv.vote_average,
            vote_count: tv.vote_count,
            runtime: tv.episode_run_time.first().copied(),
            season_count: tv.number_of_seasons,
            ..MediaIdentity::new(tv.id, MediaKind::Tv, tv.original_name, tv.original_language)
                .with_title(non_empty(tv.name))
                .with_year(year)
        }
    }

    fn recommendation_to_summary(&self, fallback: MediaKind, r: RecommendationResult) -> MediaSummary {
        let kind = r
            .media_type
            .as_deref()
            .and_then(MediaKind::parse)
            .unwrap_or(fallback);
        let date = r.release_date.as_deref().or(r.first_air_date.as_deref());

        MediaSummary {
            id: r.id,
            kind,
            release_year: year_from_date(date),
            title: r.title.or(r.name).unwrap_or_default(),
            original_title: r.original_title.or(r.original_name),
            overview: r.overview,
            poster_url: self.image_url(r.poster_path.as_deref(), "w342"),
            backdrop_url: self.image_url(r.backdrop_path.as_deref(), "w780"),
            vote_average: r.vote_average,
            genre_ids: r.genre_ids,
        }
    }

    async fn videos(&self, endpoint: &str, locale: &str) -> Result<Option<Vec<RawVideo>>> {
        let response: Option<VideosResponse> =
            self.request(endpoint, &[("language", locale)]).await?;

        Ok(response.map(|r| r.results.into_iter().map(video_to_raw).collect()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn video_to_raw(v: VideoResult) -> RawVideo {
    RawVideo {
        key: v.key,
        name: v.name,
        site: v.site,
        kind: v.video_type,
        official: v.official,
        published_at: v.published_at,
    }
}

fn entry_to_translation(entry: TranslationEntry) -> Translation {
    let (title, overview) = match entry.data {
        Some(data) => (non_empty(data.title.or(data.name)), non_empty(data.overview)),
        None => (None, None),
    };

    Translation {
        language: entry.iso_639_1,
        region: entry.iso_3166_1,
        name: entry.name,
        english_name: entry.english_name,
        title,
        overview,
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn get_detail(
        &self,
        kind: MediaKind,
        id: u64,
        locale: &str,
    ) -> Result<Option<MediaIdentity>> {
        let params = [("language", locale)];

        match kind {
            MediaKind::Movie => {
                let movie: Option<MovieDetails> =
                    self.request(&format!("/movie/{id}"), &params).await?;
                Ok(movie.map(|m| self.movie_to_identity(m)))
            }
            MediaKind::Tv => {
                let tv: Option<TvDetails> = self.request(&format!("/tv/{id}"), &params).await?;
                Ok(tv.map(|t| self.tv_to_identity(t)))
            }
            MediaKind::Anime => {
                debug!("TMDB does not serve anime detail (id: {})", id);
                Ok(None)
            }
        }
    }

    async fn get_recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        page: Option<u32>,
        locale: &str,
    ) -> Result<Option<RecommendationPage>> {
        let endpoint = format!("/{}/{id}/recommendations", kind.catalog_segment());
        let page_str;
        let mut params = vec![("language", locale)];
        if let Some(page) = page {
            page_str = page.to_string();
            params.push(("page", page_str.as_str()));
        }

        let response: Option<PagedResponse<RecommendationResult>> =
            self.request(&endpoint, &params).await?;

        Ok(response.map(|r| RecommendationPage {
            page: r.page,
            total_pages: r.total_pages,
            total_results: r.total_results,
            items: r
                .results
                .into_iter()
                .map(|item| self.recommendation_to_summary(kind, item))
                .collect(),
        }))
    }

    async fn get_season_videos(
        &self,
        tv_id: u64,
        season: u32,
        locale: &str,
    ) -> Result<Option<Vec<RawVideo>>> {
        self.videos(&format!("/tv/{tv_id}/season/{season}/videos"), locale)
            .await
    }

    async fn get_videos(
        &self,
        kind: MediaKind,
        id: u64,
        locale: &str,
    ) -> Result<Option<Vec<RawVideo>>> {
        self.videos(&format!("/{}/{id}/videos", kind.catalog_segment()), locale)
            .await
    }

    async fn get_cross_reference_id(&self, kind: MediaKind, id: u64) -> Result<Option<String>> {
        let endpoint = format!("/{}/{id}/external_ids", kind.catalog_segment());
        let ids: Option<ExternalIds> = self.request(&endpoint, &[]).await?;

        Ok(ids.and_then(|ids| non_empty(ids.imdb_id)))
    }
}

#[async_trait]
impl TranslationClient for TmdbClient {
    async fn get_translations(&self, kind: MediaKind, id: u64) -> Result<Vec<Translation>> {
        if kind == MediaKind::Anime {
            return Ok(Vec::new());
        }

        let endpoint = format!("/{}/{id}/translations", kind.catalog_segment());
        let response: Option<TranslationsResponse> = self.request(&endpoint, &[]).await?;

        Ok(response
            .map(|r| r.translations.into_iter().map(entry_to_translation).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TmdbClient {
        TmdbClient::with_base_urls("test-key", server.uri(), "https://img.test/t/p").unwrap()
    }

    #[tokio::test]
    async fn test_movie_detail_maps_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/42"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "title": "Amelie",
                "original_title": "Le Fabuleux Destin d'Amélie Poulain",
                "original_language": "fr",
                "release_date": "2001-04-25",
                "poster_path": "/poster.jpg",
                "genres": [{"id": 35, "name": "Comedy"}]
            })))
            .mount(&server)
            .await;

        let detail = client(&server)
            .get_detail(MediaKind::Movie, 42, "en")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.id, 42);
        assert_eq!(detail.kind, MediaKind::Movie);
        assert_eq!(detail.original_language, "fr");
        assert_eq!(detail.title.as_deref(), Some("Amelie"));
        assert_eq!(detail.release_year, Some(2001));
        assert_eq!(detail.poster_url.as_deref(), Some("https://img.test/t/p/w500/poster.jpg"));
        assert_eq!(detail.genres, vec!["Comedy".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_detail_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })))
            .mount(&server)
            .await;

        let detail = client(&server).get_detail(MediaKind::Tv, 7, "en").await.unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_propagated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).get_detail(MediaKind::Movie, 1, "en").await;
        assert!(matches!(result, Err(crate::resolver::ResolverError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_recommendations_without_page_omit_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/42/recommendations"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "total_pages": 3,
                "total_results": 55,
                "results": [
                    {"id": 1, "title": "A", "release_date": "2010-01-01"},
                    {"id": 2, "name": "B", "media_type": "tv", "first_air_date": "2012-05-05"}
                ]
            })))
            .mount(&server)
            .await;

        let page = client(&server)
            .get_recommendations(MediaKind::Movie, 42, None, "en")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].kind, MediaKind::Movie);
        assert_eq!(page.items[1].kind, MediaKind::Tv);
        assert_eq!(page.items[1].title, "B");
        assert_eq!(page.items[1].release_year, Some(2012));
    }

    #[tokio::test]
    async fn test_translations_use_title_or_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/9/translations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 9,
                "translations": [
                    {"iso_639_1": "de", "iso_3166_1": "DE", "data": {"name": "Dunkel", "overview": ""}},
                    {"iso_639_1": "en", "iso_3166_1": "US", "data": {"name": "Dark", "overview": "Time travel."}}
                ]
            })))
            .mount(&server)
            .await;

        let translations = client(&server)
            .get_translations(MediaKind::Tv, 9)
            .await
            .unwrap();

        assert_eq!(translations.len(), 2);
        assert_eq!(translations[0].overview, None);
        assert_eq!(translations[1].language, "en");
        assert_eq!(translations[1].title.as_deref(), Some("Dark"));
    }

    #[tokio::test]
    async fn test_cross_reference_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/42/external_ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "imdb_id": "tt0211915"
            })))
            .mount(&server)
            .await;

        let id = client(&server)
            .get_cross_reference_id(MediaKind::Movie, 42)
            .await
            .unwrap();
        assert_eq!(id.as_deref(), Some("tt0211915"));
    }

    #[tokio::test]
    async fn test_anime_detail_is_not_served() {
        let server = MockServer::start().await;

        let detail = client(&server)
            .get_detail(MediaKind::Anime, 21, "en")
            .await
            .unwrap();

        assert!(detail.is_none());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
