//! Cross-platform search endpoint (/api/v1/search)

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::models::SearchResponse;
use crate::services::error::{ApiError, LogErr};
use crate::services::search::{self as search_service, PlatformFilter, resolve_limit};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1/search", get(search))
}

/// Everything is read as a string so a malformed `limit` falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub platform: Option<String>,
    pub query: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/v1/search?platform=&query=&limit=
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("query parameter is required"))?;

    let platform = params.platform.unwrap_or_default();
    let filter = PlatformFilter::parse(&platform)
        .ok_or_else(|| ApiError::bad_request("invalid platform: must be youtube, kick, or all"))?;

    let limit = resolve_limit(params.limit.as_deref());

    let streamers = search_service::search(&state.youtube, &state.kick, filter, &query, limit)
        .await
        .log_500("Search failed")?;

    Ok(Json(SearchResponse {
        streamers,
        platform,
        query,
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::models::{ErrorResponse, Platform, SearchResponse};
    use crate::test_support::test_server;
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(yt: &MockServer, kick: &MockServer, api_key: Option<&str>) -> Config {
        Config {
            youtube_api_key: api_key.map(str::to_string),
            youtube_base_url: yt.uri(),
            kick_base_url: kick.uri(),
            ..Config::default()
        }
    }

    async fn mount_youtube(server: &MockServer, max_results: &str, ids: &[&str]) {
        let items: Vec<_> = ids
            .iter()
            .map(|id| json!({ "id": { "videoId": id }, "snippet": { "title": id, "liveBroadcastContent": "live" } }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("maxResults", max_results))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(server)
            .await;
    }

    async fn mount_kick(server: &MockServer, slugs: &[&str]) {
        let channels: Vec<_> = slugs
            .iter()
            .enumerate()
            .map(|(i, slug)| json!({ "id": i + 1, "username": slug, "slug": slug }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/v2/search/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(channels)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        let server = test_server(config(&yt, &kick, Some("k")));

        for url in [
            "/api/v1/search",
            "/api/v1/search?platform=youtube",
            "/api/v1/search?platform=bogus&limit=5",
            "/api/v1/search?query=",
        ] {
            let response = server.get(url).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{url}");

            let body: ErrorResponse = response.json();
            assert_eq!(body.message, "query parameter is required");
            assert_eq!(body.error, "Bad Request");
            assert_eq!(body.code, 400);
        }

        assert!(yt.received_requests().await.unwrap().is_empty());
        assert!(kick.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_platform_is_bad_request() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        let server = test_server(config(&yt, &kick, Some("k")));

        let response = server.get("/api/v1/search?platform=bogus&query=x").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "invalid platform: must be youtube, kick, or all");
        assert!(yt.received_requests().await.unwrap().is_empty());
        assert!(kick.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_youtube_search_echoes_request() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        mount_youtube(&yt, "5", &["a", "b"]).await;
        let server = test_server(config(&yt, &kick, Some("k")));

        let response = server
            .get("/api/v1/search")
            .add_query_param("platform", "youtube")
            .add_query_param("query", "speedrun")
            .add_query_param("limit", "5")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: SearchResponse = response.json();
        assert_eq!(body.platform, "youtube");
        assert_eq!(body.query, "speedrun");
        assert_eq!(body.streamers.len(), 2);
        assert!(body.streamers.iter().all(|s| s.platform == Platform::YouTube));
        assert!(kick.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_limit_uses_default() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        mount_youtube(&yt, "20", &["a"]).await;
        let server = test_server(config(&yt, &kick, Some("k")));

        let response = server
            .get("/api/v1/search?platform=youtube&query=test&limit=999")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<SearchResponse>().streamers.len(), 1);
    }

    #[tokio::test]
    async fn test_youtube_without_key_is_server_error() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        let server = test_server(config(&yt, &kick, None));

        let response = server.get("/api/v1/search?platform=youtube&query=x").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "YouTube API key not configured");
        assert_eq!(body.code, 500);
    }

    #[tokio::test]
    async fn test_all_platforms_merges_in_order() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        mount_youtube(&yt, "5", &["y1", "y2"]).await;
        mount_kick(&kick, &["k1", "k2", "k3"]).await;
        let server = test_server(config(&yt, &kick, Some("k")));

        let response = server.get("/api/v1/search?query=x&limit=10").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: SearchResponse = response.json();
        assert_eq!(body.platform, "");
        let ids: Vec<&str> = body.streamers.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["y1", "y2", "1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_all_platforms_survives_youtube_failure() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        mount_kick(&kick, &["k1"]).await;
        let server = test_server(config(&yt, &kick, None));

        let response = server.get("/api/v1/search?platform=all&query=x").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: SearchResponse = response.json();
        assert_eq!(body.platform, "all");
        assert_eq!(body.streamers.len(), 1);
        assert_eq!(body.streamers[0].platform, Platform::Kick);
    }

    #[tokio::test]
    async fn test_all_platforms_limit_one_is_empty() {
        let yt = MockServer::start().await;
        let kick = MockServer::start().await;
        mount_kick(&kick, &["k1"]).await;
        let server = test_server(config(&yt, &kick, Some("k")));

        let response = server.get("/api/v1/search?query=x&limit=1").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.json::<SearchResponse>().streamers.is_empty());
    }
}
