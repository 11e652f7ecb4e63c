pub mod logging;
pub mod resolver;
pub mod routes;
pub mod settings;

use axum::{Json, Router, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use resolver::{LocaleResolver, MediaResolver};

/// Shared request state
#[derive(Clone)]
pub struct Ctx {
    pub resolver: Arc<MediaResolver>,
    pub locale: Arc<LocaleResolver>,
}

impl Ctx {
    pub fn new(resolver: MediaResolver, locale: LocaleResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            locale: Arc::new(locale),
        }
    }
}

/// JSON envelope returned by every API route
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        })
    }
}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Full application router
pub fn app(ctx: Ctx) -> Router {
    Router::new()
        .nest("/api", routes::api::mount())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
