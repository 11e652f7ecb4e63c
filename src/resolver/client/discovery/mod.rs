mod client;

pub use client::HttpProviderDiscovery;
