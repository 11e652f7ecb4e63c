mod api_types;
mod client;

pub use client::{YOUTUBE_BASE_URL, YoutubeClient};
