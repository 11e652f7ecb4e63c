use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    ApiResponse, ApiResult, Ctx,
    resolver::{
        MediaKind, NavigationTarget, ProviderCriteria, ProviderOption, TitleProviders,
        WatchRequest,
    },
    routes::{Locale, bad_request, error_response},
};

/// Provider lookup parameters, named as the discovery service names them
#[derive(Debug, Deserialize)]
pub struct ProviderQuery {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(rename = "origTitle")]
    pub original_title: Option<String>,
    pub year: Option<i32>,
    pub season: Option<u32>,
    #[serde(rename = "episodeId")]
    pub episode_id: Option<String>,
}

impl ProviderQuery {
    fn into_criteria(self) -> Option<ProviderCriteria> {
        let kind = MediaKind::parse(&self.media_type)?;
        Some(ProviderCriteria {
            original_title: self.original_title.unwrap_or_else(|| self.title.clone()),
            title: self.title,
            kind,
            year: self.year,
            season: self.season,
            episode_id: self.episode_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderOption>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct WatchBody {
    pub request: WatchRequest,
    pub option: ProviderOption,
}

#[derive(Debug, Serialize)]
pub struct WatchResponse {
    pub url: String,
    #[serde(flatten)]
    pub target: NavigationTarget,
}

// ============ Handlers ============

/// Streaming sources for a title
/// GET /api/provider?title=...&type=...&origTitle=...&year=...
async fn list_providers(
    State(ctx): State<Ctx>,
    Query(params): Query<ProviderQuery>,
) -> ApiResult<ProvidersResponse> {
    let media_type = params.media_type.clone();
    let criteria = params
        .into_criteria()
        .ok_or_else(|| bad_request(format!("Unknown media type: {media_type}")))?;

    let providers = ctx.resolver.providers(&criteria).await;
    let total = providers.len();

    Ok(ApiResponse::ok(
        "Providers listed",
        ProvidersResponse { providers, total },
    ))
}

/// Streaming sources for a catalog movie, searched by its English title
/// GET /api/movies/{id}/providers
async fn movie_providers(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    locale: Locale,
) -> ApiResult<TitleProviders> {
    let found = ctx
        .resolver
        .providers_for(MediaKind::Movie, id, locale.as_str(), None, None)
        .await
        .map_err(|e| error_response("Failed to list movie providers", e))?;

    Ok(ApiResponse::ok("Providers listed", found))
}

/// GET /api/tv-shows/{id}/providers?season=...
async fn tv_providers(
    State(ctx): State<Ctx>,
    Path(id): Path<u64>,
    Query(params): Query<SeasonQuery>,
    locale: Locale,
) -> ApiResult<TitleProviders> {
    let found = ctx
        .resolver
        .providers_for(MediaKind::Tv, id, locale.as_str(), params.season, None)
        .await
        .map_err(|e| error_response("Failed to list tv providers", e))?;

    Ok(ApiResponse::ok("Providers listed", found))
}

/// Watch page location for a chosen provider
/// POST /api/provider/watch
async fn watch_target(
    State(ctx): State<Ctx>,
    Json(body): Json<WatchBody>,
) -> ApiResult<WatchResponse> {
    let target = ctx.resolver.watch_target(&body.request, &body.option);

    Ok(ApiResponse::ok(
        "Watch target built",
        WatchResponse {
            url: target.to_url(),
            target,
        },
    ))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/provider", get(list_providers))
        .route("/provider/watch", post(watch_target))
        .route("/movies/{id}/providers", get(movie_providers))
        .route("/tv-shows/{id}/providers", get(tv_providers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_into_criteria() {
        let query = ProviderQuery {
            title: "Spirited Away".to_string(),
            media_type: "movie".to_string(),
            original_title: Some("千と千尋の神隠し".to_string()),
            year: Some(2001),
            season: None,
            episode_id: None,
        };

        let criteria = query.into_criteria().unwrap();
        assert_eq!(criteria.kind, MediaKind::Movie);
        assert_eq!(criteria.original_title, "千と千尋の神隠し");
        assert_eq!(criteria.year, Some(2001));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let query = ProviderQuery {
            title: "x".to_string(),
            media_type: "podcast".to_string(),
            original_title: None,
            year: None,
            season: None,
            episode_id: None,
        };
        assert!(query.into_criteria().is_none());
    }
}
