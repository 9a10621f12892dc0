//! Cross-platform search: parameter validation and the all-platform fan-out

use crate::constants::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::models::{Platform, Streamer};
use crate::services::error::PlatformError;
use crate::services::kick::KickClient;
use crate::services::youtube::YouTubeClient;

/// Which platforms a search request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFilter {
    Only(Platform),
    All,
}

impl PlatformFilter {
    /// `""` and `"all"` both mean every platform.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" | "all" => Some(PlatformFilter::All),
            other => Platform::from_tag(other).map(PlatformFilter::Only),
        }
    }
}

/// Requested limit if it is an integer in `1..=50`, otherwise the default.
pub fn resolve_limit(raw: Option<&str>) -> usize {
    raw.and_then(|l| l.parse::<usize>().ok())
        .filter(|l| (1..=MAX_SEARCH_LIMIT).contains(l))
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
}

/// YouTube results then Kick results. Fails only when both platforms failed,
/// in which case the YouTube error is reported.
pub fn merge_platform_results(
    youtube: Result<Vec<Streamer>, PlatformError>,
    kick: Result<Vec<Streamer>, PlatformError>,
) -> Result<Vec<Streamer>, PlatformError> {
    match (youtube, kick) {
        (Err(yt_err), Err(kick_err)) => {
            tracing::warn!("All platforms failed: youtube={}, kick={}", yt_err, kick_err);
            Err(yt_err)
        }
        (youtube, kick) => {
            let mut streamers = Vec::new();
            for (platform, result) in [(Platform::YouTube, youtube), (Platform::Kick, kick)] {
                match result {
                    Ok(found) => streamers.extend(found),
                    Err(e) => {
                        tracing::warn!("{} search failed, returning partial results: {}", platform, e)
                    }
                }
            }
            Ok(streamers)
        }
    }
}

/// Run a search against one or both platforms.
///
/// With [`PlatformFilter::All`] each platform gets `limit / 2`, so an odd
/// limit loses one slot and `limit == 1` returns nothing.
pub async fn search(
    youtube: &YouTubeClient,
    kick: &KickClient,
    filter: PlatformFilter,
    query: &str,
    limit: usize,
) -> Result<Vec<Streamer>, PlatformError> {
    match filter {
        PlatformFilter::Only(Platform::YouTube) => youtube.search_videos(query, limit).await,
        PlatformFilter::Only(Platform::Kick) => Ok(kick.search_channels(query, limit).await),
        PlatformFilter::All => {
            let per_platform = limit / 2;
            let (yt, kk) = tokio::join!(
                youtube.search_videos(query, per_platform),
                kick.search_channels(query, per_platform),
            );
            merge_platform_results(yt, Ok(kk))
        }
    }
}
