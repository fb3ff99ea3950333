use crate::config::MAX_RESULTS_PER_CALL;
use crate::models::{ChannelStats, SearchHit, VideoInfo};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

pub type YouTubeResult<T> = Result<T, YouTubeError>;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("YouTube API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed YouTube response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl YouTubeError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, YouTubeError::Api { status: 403, message } if message.contains("quota"))
    }
}

/// The three read-only lookups the dashboard needs from the platform.
#[rocket::async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Most viewed first, videos only, a single page.
    async fn search_videos(&self, query: &str, max_results: u32) -> YouTubeResult<Vec<SearchHit>>;

    async fn channel_statistics(&self, channel_ids: &[String]) -> YouTubeResult<Vec<ChannelStats>>;

    async fn video_details(&self, video_ids: &[String]) -> YouTubeResult<Vec<VideoInfo>>;
}

pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    // Documentation: https://developers.google.com/youtube/v3/docs
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> YouTubeResult<T> {
        let url = format!("{}/{resource}", self.base_url);
        debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn api_error(status: StatusCode, body: &str) -> YouTubeError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string());

    YouTubeError::Api {
        status: status.as_u16(),
        message,
    }
}

#[rocket::async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_videos(&self, query: &str, max_results: u32) -> YouTubeResult<Vec<SearchHit>> {
        let max_results = max_results.to_string();
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("q", query),
                    ("part", "snippet"),
                    ("order", "viewCount"),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                    ("fields", "items(id(videoId),snippet(channelId))"),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                Some(SearchHit {
                    video_id: item.id.video_id?,
                    channel_id: item.snippet.channel_id,
                })
            })
            .collect())
    }

    async fn channel_statistics(&self, channel_ids: &[String]) -> YouTubeResult<Vec<ChannelStats>> {
        let mut stats = Vec::new();
        for chunk in channel_ids.chunks(MAX_RESULTS_PER_CALL as usize) {
            let ids = chunk.join(",");
            let response: ChannelListResponse = self
                .get_json(
                    "channels",
                    &[
                        ("id", ids.as_str()),
                        ("part", "statistics"),
                        ("fields", "items(id,statistics(subscriberCount))"),
                    ],
                )
                .await?;

            stats.extend(response.items.into_iter().map(|item| ChannelStats {
                channel_id: item.id,
                subscriber_count: item.statistics.and_then(|s| s.subscriber_count),
            }));
        }
        Ok(stats)
    }

    async fn video_details(&self, video_ids: &[String]) -> YouTubeResult<Vec<VideoInfo>> {
        let mut videos = Vec::new();
        for chunk in video_ids.chunks(MAX_RESULTS_PER_CALL as usize) {
            let ids = chunk.join(",");
            let response: VideoListResponse = self
                .get_json(
                    "videos",
                    &[
                        ("id", ids.as_str()),
                        ("part", "snippet,statistics"),
                        ("fields", "items(id,snippet(title),statistics(viewCount))"),
                    ],
                )
                .await?;

            videos.extend(response.items.into_iter().map(|item| VideoInfo {
                video_id: item.id,
                title: item.snippet.and_then(|s| s.title),
                view_count: item.statistics.and_then(|s| s.view_count),
            }));
        }
        Ok(videos)
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    #[serde(rename = "channelId")]
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
struct ChannelStatistics {
    #[serde(rename = "subscriberCount", default, deserialize_with = "count")]
    subscriber_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Option<VideoSnippet>,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount", default, deserialize_with = "count")]
    view_count: Option<u64>,
}

/// Counts arrive as decimal strings ("12345"); plain numbers are accepted too.
/// A count that is not a plain integer is treated as unreported, so one odd
/// item cannot fail the whole batch.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(u64),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) => match s.trim().parse() {
            Ok(n) => Ok(Some(n)),
            Err(e) => {
                warn!("Ignoring unparseable count {s:?}: {e}");
                Ok(None)
            }
        },
    }
}
