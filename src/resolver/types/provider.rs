use super::MediaKind;
use serde::{Deserialize, Serialize};

/// Query sent to provider discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCriteria {
    /// Title to search providers with
    pub title: String,
    pub kind: MediaKind,
    pub original_title: String,
    pub year: Option<i32>,
    /// Season number (tv only)
    pub season: Option<u32>,
    /// Episode reference (anime only)
    pub episode_id: Option<String>,
}

impl ProviderCriteria {
    /// Query parameters in the order provider discovery expects
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("title", self.title.clone()),
            ("type", self.kind.to_string()),
            ("origTitle", self.original_title.clone()),
        ];
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(season) = self.season {
            params.push(("season", season.to_string()));
        }
        if let Some(ref episode_id) = self.episode_id {
            params.push(("episodeId", episode_id.clone()));
        }
        params
    }
}

/// A streaming source able to serve the title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOption {
    /// Opaque provider key
    pub provider: String,
    /// Display name
    pub name: String,
    /// Provider-specific reference ID
    pub id: String,
}

impl ProviderOption {
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        let provider = provider.into();
        Self {
            name: provider.clone(),
            provider,
            id: id.into(),
        }
    }

    /// Builder pattern: set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Coordinates of the thing to watch once a provider is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WatchRequest {
    Movie {
        id: u64,
    },
    Tv {
        id: u64,
        season: u32,
        episode: u32,
    },
    Anime {
        id: String,
        episode_id: String,
        episode: u32,
    },
}

impl WatchRequest {
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Movie { .. } => MediaKind::Movie,
            Self::Tv { .. } => MediaKind::Tv,
            Self::Anime { .. } => MediaKind::Anime,
        }
    }
}

/// Navigation target for the watch page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl NavigationTarget {
    /// Render as a relative URL with percent-encoded query values
    #[must_use]
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{query}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_for_tv() {
        let criteria = ProviderCriteria {
            title: "Dark".to_string(),
            kind: MediaKind::Tv,
            original_title: "Dark".to_string(),
            year: Some(2017),
            season: Some(2),
            episode_id: None,
        };

        let pairs = criteria.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("title", "Dark".to_string()),
                ("type", "tv".to_string()),
                ("origTitle", "Dark".to_string()),
                ("year", "2017".to_string()),
                ("season", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_navigation_target_encodes_values() {
        let target = NavigationTarget {
            path: "/movies/1/watch".to_string(),
            query: vec![
                ("provider".to_string(), "Loklok".to_string()),
                ("id".to_string(), "a b&c".to_string()),
            ],
        };

        assert_eq!(target.to_url(), "/movies/1/watch?provider=Loklok&id=a%20b%26c");
    }
}
