//! YouTube Data API v3 client

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::Config;
use crate::models::{Platform, Streamer};
use crate::services::error::PlatformError;

#[derive(Clone)]
pub struct YouTubeClient {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self, PlatformError> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;

        Ok(Self {
            api_key: config.youtube_api_key.clone(),
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, PlatformError> {
        self.api_key.as_deref().ok_or(PlatformError::MissingApiKey)
    }

    /// Search all videos (live, past broadcasts and uploads) in upstream relevance order.
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Streamer>, PlatformError> {
        let key = self.api_key()?;
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        let max_results = max_results.to_string();
        let resp = self
            .http
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("order", "relevance"),
                ("key", key),
            ])
            .send()
            .await?;

        let body = Self::read_success(resp).await?;
        let search: SearchListResponse = serde_json::from_str(&body)?;

        let streamers: Vec<Streamer> = search
            .items
            .into_iter()
            .filter_map(SearchItem::into_streamer)
            .collect();

        tracing::debug!("YouTube search {:?} returned {} videos", query, streamers.len());
        Ok(streamers)
    }

    /// Fetch one video with its live-streaming and statistics facets.
    pub async fn get_stream_info(&self, video_id: &str) -> Result<Streamer, PlatformError> {
        let key = self.api_key()?;

        let url = format!("{}/videos", self.base_url);
        let resp = self
            .http
            .get(url)
            .query(&[
                ("part", "snippet,liveStreamingDetails,statistics"),
                ("id", video_id),
                ("key", key),
            ])
            .send()
            .await?;

        let body = Self::read_success(resp).await?;
        let videos: VideoListResponse = serde_json::from_str(&body)?;

        videos
            .items
            .into_iter()
            .next()
            .map(VideoItem::into_streamer)
            .ok_or_else(|| PlatformError::NotFound("video not found".to_string()))
    }

    async fn read_success(resp: reqwest::Response) -> Result<String, PlatformError> {
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(PlatformError::UpstreamStatus {
                platform: "YouTube",
                status,
            });
        }
        Ok(resp.text().await?)
    }
}

/// `high` beats `medium`; anything else means no thumbnail.
fn best_thumbnail(thumbnails: &Thumbnails) -> String {
    [&thumbnails.high, &thumbnails.medium]
        .into_iter()
        .flatten()
        .map(|t| t.url.as_str())
        .find(|url| !url.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn is_live(live_broadcast_content: &str) -> bool {
    live_broadcast_content == "live"
}

/// Numeric fields arrive as strings; anything unparsable counts as zero.
fn parse_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

// Upstream payloads

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl SearchItem {
    fn into_streamer(self) -> Option<Streamer> {
        let video_id = self.id.video_id.filter(|id| !id.is_empty())?;
        let snippet = self.snippet;

        Some(
            Streamer::new(
                Platform::YouTube,
                video_id,
                snippet.channel_id,
                snippet.channel_title,
            )
            .with_title(snippet.title)
            .with_thumbnail(best_thumbnail(&snippet.thumbnails))
            .with_live(is_live(&snippet.live_broadcast_content)),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Snippet {
    channel_id: String,
    channel_title: String,
    title: String,
    live_broadcast_content: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    #[serde(default)]
    live_streaming_details: LiveStreamingDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LiveStreamingDetails {
    concurrent_viewers: Option<String>,
}

impl VideoItem {
    /// Concurrent viewers when live, otherwise total views.
    fn viewer_count(&self) -> u64 {
        let concurrent = self
            .live_streaming_details
            .concurrent_viewers
            .as_deref()
            .filter(|v| !v.is_empty());
        let views = self
            .statistics
            .view_count
            .as_deref()
            .filter(|v| !v.is_empty());

        concurrent.or(views).map(parse_count).unwrap_or(0)
    }

    fn into_streamer(self) -> Streamer {
        let viewer_count = self.viewer_count();
        let snippet = self.snippet;

        Streamer::new(
            Platform::YouTube,
            self.id,
            snippet.channel_id,
            snippet.channel_title,
        )
        .with_title(snippet.title)
        .with_thumbnail(best_thumbnail(&snippet.thumbnails))
        .with_viewer_count(viewer_count)
        .with_live(is_live(&snippet.live_broadcast_content))
    }
}
