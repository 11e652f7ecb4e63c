mod api_types;
mod client;

pub use client::{TMDB_BASE_URL, TMDB_IMAGE_BASE, TmdbClient};
