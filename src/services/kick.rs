//! Kick client built on the unofficial web API.
//!
//! Kick has no documented, unauthenticated search API. Search walks a short
//! chain of candidate endpoints and, when none of them produce channels, falls
//! back to looking the query up as a channel slug. Search never fails: an
//! empty list is returned instead, so callers can carry on with other
//! platforms. Single-channel lookup does report errors.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::Deserialize;

use crate::config::Config;
use crate::constants::{
    BROWSER_USER_AGENT, KICK_MIN_SEARCH_BODY_LEN, KICK_SITE_ORIGIN, LOG_BODY_PREVIEW_CHARS,
};
use crate::models::{Platform, Streamer};
use crate::services::error::PlatformError;

/// Characters left unescaped in a slug path segment
const SLUG_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Search endpoints, tried in order
const SEARCH_PATHS: [&str; 3] = ["/api/v2/search/channels", "/api/v1/search", "/api/search"];

/// Canonical channel key: lowercase with all whitespace removed.
///
/// Idempotent, so it is safe to apply to values that may already be slugs.
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect()
}

#[derive(Clone)]
pub struct KickClient {
    base_url: String,
    http: Client,
}

impl KickClient {
    pub fn new(config: &Config) -> Result<Self, PlatformError> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;

        Ok(Self {
            base_url: config.kick_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Search channels, returning at most `max_results` in upstream order.
    pub async fn search_channels(&self, query: &str, max_results: usize) -> Vec<Streamer> {
        if max_results == 0 {
            return Vec::new();
        }

        for search_path in SEARCH_PATHS {
            match self.try_search_endpoint(search_path, query).await {
                Ok(Some(channels)) => {
                    let streamers: Vec<Streamer> = channels
                        .into_iter()
                        .filter_map(SearchChannel::into_streamer)
                        .take(max_results)
                        .collect();
                    tracing::debug!(
                        "[Kick] {} returned {} channels for {:?}",
                        search_path,
                        streamers.len(),
                        query
                    );
                    return streamers;
                }
                Ok(None) => {}
                Err(e) => tracing::debug!("[Kick] {} failed: {}", search_path, e),
            }
        }

        tracing::debug!("[Kick] all search endpoints failed, trying direct channel lookup");
        self.fallback_direct_lookup(query, max_results).await
    }

    /// `Ok(None)` means the endpoint answered but had nothing usable.
    async fn try_search_endpoint(
        &self,
        search_path: &str,
        query: &str,
    ) -> Result<Option<Vec<SearchChannel>>, PlatformError> {
        let url = format!("{}{}", self.base_url, search_path);
        let referer = format!(
            "{}/search?query={}",
            KICK_SITE_ORIGIN,
            utf8_percent_encode(query, NON_ALPHANUMERIC)
        );

        let resp = self
            .browser_request(&url, &referer)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(
            "[Kick] response from {}: status={}, body={}",
            url,
            status.as_u16(),
            preview(&body)
        );

        if status != StatusCode::OK || body.len() <= KICK_MIN_SEARCH_BODY_LEN {
            return Ok(None);
        }

        Ok(decode_search_channels(&body))
    }

    async fn fallback_direct_lookup(&self, query: &str, max_results: usize) -> Vec<Streamer> {
        match self.get_channel_info(query).await {
            Ok(streamer) => {
                let mut streamers = vec![streamer];
                streamers.truncate(max_results);
                streamers
            }
            Err(e) => {
                tracing::debug!("[Kick] fallback lookup for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Look up one channel by slug. The slug is normalized first.
    pub async fn get_channel_info(&self, channel_slug: &str) -> Result<Streamer, PlatformError> {
        let slug = normalize_slug(channel_slug);
        if slug.is_empty() {
            return Err(PlatformError::NotFound("channel slug is empty".to_string()));
        }

        let url = format!(
            "{}/api/v2/channels/{}",
            self.base_url,
            utf8_percent_encode(&slug, SLUG_SEGMENT)
        );
        tracing::debug!("[Kick] fetching channel: {}", url);

        let referer = format!("{}/", KICK_SITE_ORIGIN);
        let resp = self.browser_request(&url, &referer).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(
            "[Kick] channel response (status {}): {}",
            status.as_u16(),
            preview(&body)
        );

        if status != StatusCode::OK {
            return Err(PlatformError::NotFound(format!(
                "channel not found: {} (status {})",
                slug,
                status.as_u16()
            )));
        }

        let channel: ChannelResponse = serde_json::from_str(&body).map_err(|e| {
            PlatformError::NotFound(format!("failed to decode channel {}: {}", slug, e))
        })?;

        let streamer = channel.into_streamer(&slug);
        tracing::debug!(
            "[Kick] fetched channel {} (ID: {})",
            streamer.display_name,
            streamer.id
        );
        Ok(streamer)
    }

    fn browser_request(&self, url: &str, referer: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ACCEPT, "application/json, text/plain, */*")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(header::ORIGIN, KICK_SITE_ORIGIN)
            .header(header::REFERER, referer)
    }
}

/// Bare array first, then `{"channels": [...]}`. The first non-empty decode wins.
fn decode_search_channels(body: &str) -> Option<Vec<SearchChannel>> {
    let bare = serde_json::from_str::<Vec<SearchChannel>>(body).ok();

    bare.filter(|channels| !channels.is_empty()).or_else(|| {
        serde_json::from_str::<SearchEnvelope>(body)
            .ok()
            .map(|envelope| envelope.channels)
            .filter(|channels| !channels.is_empty())
    })
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(LOG_BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn first_category(categories: Option<Vec<Category>>) -> Option<String> {
    categories
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| non_empty(c.name))
}

// Upstream payloads. Kick sends `null` freely, hence all the Options.

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    channels: Vec<SearchChannel>,
}

#[derive(Debug, Deserialize)]
struct SearchChannel {
    id: u64,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    profile_pic: Option<String>,
    #[serde(default)]
    is_live: Option<bool>,
    #[serde(default)]
    viewer_count: Option<u64>,
    #[serde(default)]
    recent_categories: Option<Vec<Category>>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(default)]
    name: Option<String>,
}

impl SearchChannel {
    /// `None` when the channel has neither a slug nor a username to key URLs on.
    fn into_streamer(self) -> Option<Streamer> {
        let username = non_empty(self.username).unwrap_or_default();
        let slug = non_empty(self.slug).unwrap_or_else(|| normalize_slug(&username));
        if slug.is_empty() {
            return None;
        }

        let title = first_category(self.recent_categories).unwrap_or_else(|| username.clone());

        Some(
            Streamer::new(Platform::Kick, self.id.to_string(), slug, username)
                .with_title(title)
                .with_thumbnail(self.profile_pic.unwrap_or_default())
                .with_viewer_count(self.viewer_count.unwrap_or(0))
                .with_live(self.is_live.unwrap_or(false)),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    id: u64,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    user: Option<ChannelUser>,
    #[serde(default)]
    livestream: Option<Livestream>,
    #[serde(default)]
    recent_categories: Option<Vec<Category>>,
}

#[derive(Debug, Default, Deserialize)]
struct ChannelUser {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profile_pic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Livestream {
    #[serde(default)]
    session_title: Option<String>,
    #[serde(default)]
    is_live: Option<bool>,
    #[serde(default)]
    viewer_count: Option<u64>,
    #[serde(default)]
    thumbnail: Option<LivestreamThumbnail>,
}

#[derive(Debug, Deserialize)]
struct LivestreamThumbnail {
    #[serde(default)]
    url: Option<String>,
}

impl ChannelResponse {
    /// Title: live session title, then latest category, then display name.
    fn into_streamer(self, requested_slug: &str) -> Streamer {
        let slug = non_empty(self.slug).unwrap_or_else(|| requested_slug.to_string());
        let user = self.user.unwrap_or_default();
        let display_name = non_empty(user.username).unwrap_or_else(|| slug.clone());
        let mut thumbnail = user.profile_pic.unwrap_or_default();

        let (session_title, viewer_count, is_live) = match self.livestream {
            Some(live) => {
                if let Some(url) = non_empty(live.thumbnail.and_then(|t| t.url)) {
                    thumbnail = url;
                }
                (
                    non_empty(live.session_title),
                    live.viewer_count.unwrap_or(0),
                    live.is_live.unwrap_or(false),
                )
            }
            None => (None, 0, false),
        };

        let title = session_title
            .or_else(|| first_category(self.recent_categories))
            .unwrap_or_else(|| display_name.clone());

        Streamer::new(Platform::Kick, self.id.to_string(), slug, display_name)
            .with_title(title)
            .with_thumbnail(thumbnail)
            .with_viewer_count(viewer_count)
            .with_live(is_live)
    }
}
