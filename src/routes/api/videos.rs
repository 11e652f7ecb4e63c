use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{ApiResponse, ApiResult, Ctx, resolver::VideoDetails};

#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    /// Comma-joined platform keys
    #[serde(default)]
    pub id: String,
}

/// Enriched details for platform videos
/// GET /api/youtube-video?id=a,b
async fn video_details(
    State(ctx): State<Ctx>,
    Query(params): Query<VideoQuery>,
) -> ApiResult<Vec<VideoDetails>> {
    let videos = ctx.resolver.video_details(&params.id).await;
    Ok(ApiResponse::ok("Videos retrieved", videos))
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/youtube-video", get(video_details))
}
