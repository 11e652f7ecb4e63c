use axum::Router;

use crate::Ctx;

pub mod health;
pub mod media;
pub mod provider;
pub mod videos;


/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(health::mount())
        .merge(media::mount())
        .merge(provider::mount())
        .merge(videos::mount())
}
