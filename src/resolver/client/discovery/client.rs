use crate::resolver::{
    Result,
    client::{HttpClient, ProviderDiscovery},
    types::{ProviderCriteria, ProviderOption},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct DiscoveryResponse {
    #[serde(default)]
    provider: Vec<DiscoveredProvider>,
}

#[derive(Debug, Deserialize)]
struct DiscoveredProvider {
    /// Reference ID; some sources answer with numbers
    id: Value,
    provider: String,
    name: Option<String>,
}

impl DiscoveredProvider {
    fn into_option(self) -> ProviderOption {
        let id = match self.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        let option = ProviderOption::new(self.provider, id);

        match self.name {
            Some(name) if !name.is_empty() => option.with_name(name),
            _ => option,
        }
    }
}

/// Provider discovery over HTTP (`GET {base}/provider?title=..&type=..`)
pub struct HttpProviderDiscovery {
    client: HttpClient,
}

impl HttpProviderDiscovery {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url)?,
        })
    }
}

#[async_trait]
impl ProviderDiscovery for HttpProviderDiscovery {
    async fn find_providers(&self, criteria: &ProviderCriteria) -> Result<Vec<ProviderOption>> {
        let pairs = criteria.query_pairs();
        let params: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let response: DiscoveryResponse = self.client.get_with_params("/provider", &params).await?;

        Ok(response
            .provider
            .into_iter()
            .map(DiscoveredProvider::into_option)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::types::MediaKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_providers_keep_upstream_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/provider"))
            .and(query_param("title", "Spirited Away"))
            .and(query_param("type", "anime"))
            .and(query_param("episodeId", "ep-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "provider": [
                    {"id": "zoro-1", "provider": "Zoro"},
                    {"id": 17, "provider": "Loklok", "name": "Loklok HD"}
                ]
            })))
            .mount(&server)
            .await;

        let discovery = HttpProviderDiscovery::new(server.uri()).unwrap();
        let criteria = ProviderCriteria {
            title: "Spirited Away".to_string(),
            kind: MediaKind::Anime,
            original_title: "千と千尋の神隠し".to_string(),
            year: Some(2001),
            season: None,
            episode_id: Some("ep-1".to_string()),
        };

        let options = discovery.find_providers(&criteria).await.unwrap();

        assert_eq!(
            options,
            vec![
                ProviderOption::new("Zoro", "zoro-1"),
                ProviderOption::new("Loklok", "17").with_name("Loklok HD"),
            ]
        );
    }
}
