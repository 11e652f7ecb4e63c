mod client;

pub use client::ImdbRatingClient;
