use crate::resolver::{Result, client::{HttpClient, RatingClient}, types::Rating};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RatingResponse {
    count: Option<u64>,
    star: Option<f64>,
}

/// Client for an IMDB rating lookup service
///
/// Expects `GET {base}/rating/{imdb_id}` to answer `{"count": .., "star": ..}`.
pub struct ImdbRatingClient {
    client: HttpClient,
}

impl ImdbRatingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url)?,
        })
    }
}

#[async_trait]
impl RatingClient for ImdbRatingClient {
    async fn get_rating(&self, cross_reference_id: &str) -> Result<Option<Rating>> {
        let endpoint = format!("/rating/{}", urlencoding::encode(cross_reference_id));
        let response: Option<RatingResponse> = self.client.get_optional(&endpoint, &[]).await?;

        // Zero votes is still a rating; only a missing score means none
        Ok(response.and_then(|r| {
            r.star.map(|score| Rating {
                count: r.count.unwrap_or_default(),
                score,
            })
        }))
    }
}
