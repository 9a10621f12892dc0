//! Application constants

/// Results returned by a search when no usable `limit` is supplied
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Largest `limit` a caller may request
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Default per-call timeout for upstream requests (seconds)
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// YouTube Data API v3 root
pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Kick web API root (unofficial, unauthenticated)
pub const KICK_BASE_URL: &str = "https://kick.com";

/// Public Kick site, used for Origin/Referer regardless of the API base
pub const KICK_SITE_ORIGIN: &str = "https://kick.com";

/// Kick rejects requests that don't look like they come from a browser
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Kick search bodies this short are treated as empty
pub const KICK_MIN_SEARCH_BODY_LEN: usize = 10;

/// Upstream bodies are truncated to this many characters in debug logs
pub const LOG_BODY_PREVIEW_CHARS: usize = 300;

/// CORS preflight cache duration (seconds)
pub const CORS_MAX_AGE_SECS: u64 = 300;
