use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    ApiResponse, ApiResult, Ctx,
    resolver::{
        AggregateResult, MediaKind, RecommendationPage, SeasonVideos, TitleVideos, VideoCategory,
        paginator::parse_page_param,
    },
    routes::{Locale, bad_request, error_response},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Raw page value; non-numeric text leaves the page unspecified
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonVideoQuery {
    /// Category label ("Behind the Scenes") or picker index ("3")
    pub category: Option<String>,
}

fn parse_category(raw: Option<&str>) -> Option<VideoCategory> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Some(VideoCategory::Trailer),
        Some(raw) => VideoCategory::from_label(raw).or_else(|| {
            raw.parse::<usize>()
                .ok()
                .and_then(VideoCategory::from_index)
        }),
    }
}

// ============ Handlers ============

async fn detail(ctx: &Ctx, kind: MediaKind, id: u64, locale: &Locale) -> ApiResult<AggregateResult> {
    let result = ctx
        .resolver
        .aggregate(kind, id, locale.as_str())
        .await
        .map_err(|e| error_response("Detail lookup failed", e))?;

    Ok(ApiResponse::ok("Detail retrieved", result))
}

/// GET /api/movies/{id}
async fn movie_detail(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    locale: Locale,
) -> ApiResult<AggregateResult> {
    detail(&ctx, MediaKind::Movie, id, &locale).await
}

/// GET /api/tv-shows/{id}
async fn tv_detail(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    locale: Locale,
) -> ApiResult<AggregateResult> {
    detail(&ctx, MediaKind::Tv, id, &locale).await
}

async fn recommendations(
    ctx: &Ctx,
    kind: MediaKind,
    id: u64,
    params: &RecommendationQuery,
    locale: &Locale,
) -> ApiResult<RecommendationPage> {
    let page = parse_page_param(params.page.as_deref()).map(i64::from);

    let result = ctx
        .resolver
        .recommendations(kind, id, page, locale.as_str())
        .await
        .map_err(|e| error_response("Recommendations failed", e))?;

    Ok(ApiResponse::ok("Recommendations retrieved", result))
}

/// GET /api/movies/{id}/recommendations?page=...
async fn movie_recommendations(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    Query(params): Query<RecommendationQuery>,
    locale: Locale,
) -> ApiResult<RecommendationPage> {
    recommendations(&ctx, MediaKind::Movie, id, &params, &locale).await
}

/// GET /api/tv-shows/{id}/recommendations?page=...
async fn tv_recommendations(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    Query(params): Query<RecommendationQuery>,
    locale: Locale,
) -> ApiResult<RecommendationPage> {
    recommendations(&ctx, MediaKind::Tv, id, &params, &locale).await
}

async fn title_videos(ctx: &Ctx, kind: MediaKind, id: u64, locale: &Locale) -> ApiResult<TitleVideos> {
    let videos = ctx
        .resolver
        .title_videos(kind, id, locale.as_str())
        .await
        .map_err(|e| error_response("Video lookup failed", e))?;

    Ok(ApiResponse::ok("Videos retrieved", videos))
}

/// GET /api/movies/{id}/videos
async fn movie_videos(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    locale: Locale,
) -> ApiResult<TitleVideos> {
    title_videos(&ctx, MediaKind::Movie, id, &locale).await
}

/// GET /api/tv-shows/{id}/videos
async fn tv_videos(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    locale: Locale,
) -> ApiResult<TitleVideos> {
    title_videos(&ctx, MediaKind::Tv, id, &locale).await
}

/// GET /api/tv-shows/{id}/season/{season}/videos?category=...
async fn season_videos(
    State(ctx): State<Ctx>,
    Path((id, season)): Path<(u64, u32)>,
    Query(params): Query<SeasonVideoQuery>,
    locale: Locale,
) -> ApiResult<SeasonVideos> {
    let category = parse_category(params.category.as_deref()).ok_or_else(|| {
        bad_request(format!(
            "Unknown video category: {}",
            params.category.as_deref().unwrap_or_default()
        ))
    })?;

    let videos = ctx
        .resolver
        .season_videos(id, season, category, locale.as_str())
        .await
        .map_err(|e| error_response("Season video lookup failed", e))?;

    Ok(ApiResponse::ok("Season videos retrieved", videos))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/movies/{id}", get(movie_detail))
        .route("/movies/{id}/recommendations", get(movie_recommendations))
        .route("/movies/{id}/videos", get(movie_videos))
        .route("/tv-shows/{id}", get(tv_detail))
        .route("/tv-shows/{id}/recommendations", get(tv_recommendations))
        .route("/tv-shows/{id}/videos", get(tv_videos))
        .route("/tv-shows/{id}/season/{season}/videos", get(season_videos))
}
