//! Application configuration.
//!
//! Values come from an optional TOML file layered under `SORA_*` environment
//! variables, e.g. `SORA_TMDB__API_KEY` or `SORA_SERVER__PORT`.

use crate::resolver::{
    ResolverError,
    client::{tmdb::{TMDB_BASE_URL, TMDB_IMAGE_BASE}, youtube::YOUTUBE_BASE_URL},
    locale::LocaleConfig,
};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "SORA";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Catalog and translation source
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base")]
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base(),
        }
    }
}

/// Rating service; ratings are skipped when unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingConfig {
    pub base_url: Option<String>,
}

/// Video platform; enrichment is skipped without an API key
#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_youtube_base_url(),
        }
    }
}

/// Provider discovery; no providers are offered when unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
    /// Also write daily-rotated log files here
    pub directory: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            directory: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_tmdb_base_url() -> String {
    TMDB_BASE_URL.to_string()
}

fn default_tmdb_image_base() -> String {
    TMDB_IMAGE_BASE.to_string()
}

fn default_youtube_base_url() -> String {
    YOUTUBE_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load from `path` (or `./config.toml` if present) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ResolverError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        Self::from_builder(Config::builder().add_source(file))
    }

    /// Load from TOML text and the environment
    pub fn from_toml(toml: &str) -> Result<Self, ResolverError> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ResolverError> {
        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ResolverError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ResolverError> {
        if self.tmdb.api_key.trim().is_empty() {
            return Err(ResolverError::Config("tmdb.api_key is required".to_string()));
        }
        if self.server.port == 0 {
            return Err(ResolverError::Config("server.port cannot be 0".to_string()));
        }
        if self.locale.supported.is_empty() {
            return Err(ResolverError::Config(
                "locale.supported must list at least one language".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = AppConfig::from_toml("[tmdb]\napi_key = \"abc\"\n").unwrap();

        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.base_url, TMDB_BASE_URL);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.locale.fallback, "en");
        assert!(config.rating.base_url.is_none());
        assert!(config.youtube.api_key.is_none());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let result = AppConfig::from_toml("[server]\nport = 8080\n");
        assert!(matches!(result, Err(ResolverError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[tmdb]
api_key = "key"

[rating]
base_url = "http://ratings.local"

[locale]
supported = ["en", "fr"]
fallback = "en"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.rating.base_url.as_deref(), Some("http://ratings.local"));
        assert_eq!(config.locale.supported, vec!["en", "fr"]);
    }
}
