//! Canonical cross-platform models shared by clients and routes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream platform a [`Streamer`] was sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Kick,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Kick => "kick",
        }
    }

    /// Parse a single-platform tag. `"all"` is not a platform.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "youtube" => Some(Platform::YouTube),
            "kick" => Some(Platform::Kick),
            _ => None,
        }
    }

    /// Player URL. `key` is the video ID for YouTube and the channel slug for Kick.
    pub fn embed_url(self, key: &str) -> String {
        match self {
            Platform::YouTube => format!("https://www.youtube.com/embed/{}?autoplay=1", key),
            Platform::Kick => format!("https://player.kick.com/{}", key),
        }
    }

    /// Chat URL. Same key rules as [`Platform::embed_url`].
    pub fn chat_url(self, key: &str) -> String {
        match self {
            Platform::YouTube => format!(
                "https://www.youtube.com/live_chat?v={}&embed_domain=localhost",
                key
            ),
            Platform::Kick => format!("https://kick.com/{}/chatroom", key),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One channel or video, normalized across platforms.
///
/// Built in one go by a platform client via [`Streamer::new`] and the `with_*`
/// methods; the embed and chat URLs are derived in `new` and never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streamer {
    pub id: String,
    pub platform: Platform,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub thumbnail: String,
    pub title: String,
    pub viewer_count: u64,
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub embed_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chat_url: String,
}

impl Streamer {
    pub fn new(
        platform: Platform,
        id: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let username = username.into();
        let url_key = match platform {
            Platform::YouTube => id.as_str(),
            Platform::Kick => username.as_str(),
        };
        let embed_url = platform.embed_url(url_key);
        let chat_url = platform.chat_url(url_key);

        Self {
            id,
            platform,
            username,
            display_name: display_name.into(),
            thumbnail: String::new(),
            title: String::new(),
            viewer_count: 0,
            is_live: false,
            embed_url,
            chat_url,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    pub fn with_viewer_count(mut self, viewer_count: u64) -> Self {
        self.viewer_count = viewer_count;
        self
    }

    pub fn with_live(mut self, is_live: bool) -> Self {
        self.is_live = is_live;
        self
    }
}

/// Response for `GET /api/v1/search`
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub streamers: Vec<Streamer>,
    /// The filter exactly as requested, possibly empty
    pub platform: String,
    pub query: String,
}

/// Response for `GET /api/v1/stream/{platform}/{id}`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub streamer: Streamer,
    pub embed_url: String,
    pub chat_url: String,
}

impl From<Streamer> for StreamResponse {
    fn from(streamer: Streamer) -> Self {
        Self {
            embed_url: streamer.embed_url.clone(),
            chat_url: streamer.chat_url.clone(),
            streamer,
        }
    }
}

/// JSON body for every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_youtube_urls_derive_from_id() {
        let s = Streamer::new(Platform::YouTube, "dQw4w9WgXcQ", "UC123", "Rick");
        assert_eq!(s.embed_url, "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1");
        assert_eq!(
            s.chat_url,
            "https://www.youtube.com/live_chat?v=dQw4w9WgXcQ&embed_domain=localhost"
        );
    }

    #[test]
    fn test_kick_urls_derive_from_slug() {
        let s = Streamer::new(Platform::Kick, "668", "xqc", "xQc");
        assert_eq!(s.embed_url, "https://player.kick.com/xqc");
        assert_eq!(s.chat_url, "https://kick.com/xqc/chatroom");
    }

    #[test]
    fn test_urls_are_reproducible() {
        let a = Streamer::new(Platform::Kick, "1", "slug", "A").with_title("x");
        let b = Streamer::new(Platform::Kick, "1", "slug", "B").with_live(true);
        assert_eq!(a.embed_url, b.embed_url);
        assert_eq!(a.chat_url, b.chat_url);
        assert_eq!(a.embed_url, Platform::Kick.embed_url("slug"));
    }

    #[test]
    fn test_streamer_serializes_camel_case() {
        let s = Streamer::new(Platform::YouTube, "vid", "chan", "Name")
            .with_title("Title")
            .with_viewer_count(42)
            .with_live(true);

        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["platform"], json!("youtube"));
        assert_eq!(value["displayName"], json!("Name"));
        assert_eq!(value["viewerCount"], json!(42));
        assert_eq!(value["isLive"], json!(true));
        assert_eq!(value["thumbnail"], json!(""));
        assert!(value.get("embedUrl").is_some());
    }

    #[test]
    fn test_empty_urls_are_omitted() {
        let mut s = Streamer::new(Platform::Kick, "1", "slug", "A");
        s.embed_url.clear();
        s.chat_url.clear();
        let value = serde_json::to_value(&s).unwrap();
        assert!(value.get("embedUrl").is_none());
        assert!(value.get("chatUrl").is_none());
    }

    #[test]
    fn test_stream_response_mirrors_streamer_urls() {
        let s = Streamer::new(Platform::Kick, "1", "slug", "A");
        let resp = StreamResponse::from(s);
        assert_eq!(resp.embed_url, resp.streamer.embed_url);
        assert_eq!(resp.chat_url, resp.streamer.chat_url);
    }

    #[test]
    fn test_platform_tags() {
        assert_eq!(Platform::from_tag("youtube"), Some(Platform::YouTube));
        assert_eq!(Platform::from_tag("kick"), Some(Platform::Kick));
        assert_eq!(Platform::from_tag("all"), None);
        assert_eq!(Platform::from_tag("YouTube"), None);
    }
}
