use axum::{Router, routing::get};
use serde::Serialize;

use crate::{ApiResponse, ApiResult, Ctx};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health
async fn health() -> ApiResult<HealthResponse> {
    Ok(ApiResponse::ok(
        "Service healthy",
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    ))
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
