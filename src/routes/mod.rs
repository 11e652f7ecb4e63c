use axum::{
    Json,
    extract::{FromRequestParts, Query},
    http::{StatusCode, header, request::Parts},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::convert::Infallible;
use tracing::warn;

use crate::{
    ApiError, ApiResponse, Ctx,
    resolver::{ResolverError, locale::LOCALE_PARAM},
};

pub mod api;

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    lng: Option<String>,
}

/// Request language, resolved from `?lng=`, the `lng` cookie and
/// `Accept-Language` in that order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<Ctx> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, ctx: &Ctx) -> Result<Self, Self::Rejection> {
        let query = Query::<LocaleQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lng);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(LOCALE_PARAM).map(|c| c.value().to_string());
        let accept_language = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());

        Ok(Self(ctx.locale.resolve(
            query.as_deref(),
            cookie.as_deref(),
            accept_language,
        )))
    }
}

/// Map a resolver error onto the API error envelope
pub fn error_response(context: &str, err: ResolverError) -> ApiError {
    let status = match err {
        ResolverError::NotFound(_) => StatusCode::NOT_FOUND,
        ResolverError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => {
            warn!("{}: {}", context, err);
            StatusCode::BAD_GATEWAY
        }
    };

    (
        status,
        Json(ApiResponse {
            code: status.as_u16(),
            message: format!("{context}: {err}"),
            data: None,
        }),
    )
}

/// 400 response for malformed input
pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            code: 400,
            message: message.into(),
            data: None,
        }),
    )
}
