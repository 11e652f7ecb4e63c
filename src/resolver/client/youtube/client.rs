use super::api_types::{VideoItem, VideoListResponse};
use crate::resolver::{
    Result,
    client::{HttpClient, VideoPlatformClient},
    types::{Thumbnails, VideoDetails},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API v3 client
pub struct YoutubeClient {
    client: HttpClient,
    api_key: String,
}

impl YoutubeClient {
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url)?,
            api_key: api_key.into(),
        })
    }

    fn item_to_details(item: VideoItem) -> VideoDetails {
        let Some(snippet) = item.snippet else {
            return VideoDetails {
                id: item.id,
                ..Default::default()
            };
        };

        let thumbnails = snippet
            .thumbnails
            .map(|t| Thumbnails {
                default: t.default.map(|x| x.url),
                medium: t.medium.map(|x| x.url),
                high: t.high.map(|x| x.url),
            })
            .unwrap_or_default();

        VideoDetails {
            id: item.id,
            title: snippet.title.unwrap_or_default(),
            channel_title: snippet.channel_title,
            description: snippet.description,
            published_at: snippet
                .published_at
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|d| d.with_timezone(&Utc)),
            thumbnails,
        }
    }
}

#[async_trait]
impl VideoPlatformClient for YoutubeClient {
    async fn get_video_details(&self, keys: &str) -> Result<Vec<VideoDetails>> {
        let response: VideoListResponse = self
            .client
            .get_with_params(
                "/videos",
                &[("part", "snippet"), ("id", keys), ("key", self.api_key.as_str())],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(Self::item_to_details)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_video_details_are_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "abc,def"))
            .and(query_param("part", "snippet"))
            .and(query_param("key", "yt-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {
                        "id": "abc",
                        "snippet": {
                            "title": "Official Trailer",
                            "channelTitle": "Studio",
                            "publishedAt": "2020-01-02T03:04:05Z",
                            "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/abc/mqdefault.jpg"}}
                        }
                    },
                    {"id": "def"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("yt-key", server.uri()).unwrap();
        let videos = client.get_video_details("abc,def").await.unwrap();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title, "Official Trailer");
        assert_eq!(videos[0].channel_title.as_deref(), Some("Studio"));
        assert_eq!(
            videos[0].thumbnails.medium.as_deref(),
            Some("https://i.ytimg.com/vi/abc/mqdefault.jpg")
        );
        assert!(videos[0].published_at.is_some());
        assert_eq!(videos[1].id, "def");
        assert!(videos[1].title.is_empty());
    }
}
