use serde::Deserialize;

/// Cookie and query parameter carrying an explicit language choice
pub const LOCALE_PARAM: &str = "lng";

/// Locale resolver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Languages the front-end is translated into
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
    /// Language used when nothing else matches
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_supported() -> Vec<String> {
    vec!["en".to_string(), "vi".to_string()]
}

fn default_fallback() -> String {
    "en".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
            fallback: default_fallback(),
        }
    }
}

/// Maps an inbound request to a supported language code
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: Vec<String>,
    fallback: String,
}

impl LocaleResolver {
    pub fn new(config: &LocaleConfig) -> Self {
        Self {
            supported: config
                .supported
                .iter()
                .map(|l| l.to_lowercase())
                .collect(),
            fallback: config.fallback.to_lowercase(),
        }
    }

    /// Resolve from query parameter, cookie, then `Accept-Language`
    pub fn resolve(
        &self,
        query: Option<&str>,
        cookie: Option<&str>,
        accept_language: Option<&str>,
    ) -> String {
        query
            .and_then(|q| self.match_supported(q))
            .or_else(|| cookie.and_then(|c| self.match_supported(c)))
            .or_else(|| {
                accept_language.and_then(|header| {
                    parse_accept_language(header)
                        .into_iter()
                        .find_map(|tag| self.match_supported(&tag))
                })
            })
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Primary subtag of `tag` if it is supported
    fn match_supported(&self, tag: &str) -> Option<String> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())?;

        self.supported.contains(&primary).then_some(primary)
    }
}

/// Language tags from an `Accept-Language` header, highest weight first
fn parse_accept_language(header: &str) -> Vec<String> {
    let mut tags: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            (quality > 0.0).then(|| (tag.to_string(), quality))
        })
        .collect();

    // Stable sort keeps header order among equal weights
    tags.sort_by(|a, b| b.1.total_cmp(&a.1));
    tags.into_iter().map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocaleResolver {
        LocaleResolver::new(&LocaleConfig::default())
    }

    #[test]
    fn test_query_wins() {
        assert_eq!(resolver().resolve(Some("vi"), Some("en"), Some("en-US")), "vi");
    }

    #[test]
    fn test_cookie_before_header() {
        assert_eq!(resolver().resolve(None, Some("vi"), Some("en-US,en;q=0.9")), "vi");
    }

    #[test]
    fn test_accept_language_weights() {
        assert_eq!(
            resolver().resolve(None, None, Some("fr-FR,fr;q=0.9,vi;q=0.8,en;q=0.7")),
            "vi"
        );
        assert_eq!(resolver().resolve(None, None, Some("en;q=0.2, vi-VN;q=0.5")), "vi");
    }

    #[test]
    fn test_unsupported_falls_back() {
        assert_eq!(resolver().resolve(Some("de"), None, Some("ja,zh;q=0.5")), "en");
        assert_eq!(resolver().resolve(None, None, None), "en");
    }

    #[test]
    fn test_zero_weight_is_ignored() {
        assert_eq!(resolver().resolve(None, None, Some("vi;q=0, en;q=0.1")), "en");
    }
}
