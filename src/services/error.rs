//! Error types for platform clients and route handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::ErrorResponse;

/// Failure talking to an upstream platform
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("YouTube API key not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{platform} API error: status {status}")]
    UpstreamStatus {
        platform: &'static str,
        status: StatusCode,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),
}

/// Error returned from a handler, rendered as an [`ErrorResponse`] body
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
            code: self.status.as_u16(),
        };

        (self.status, Json(body)).into_response()
    }
}

/// Extension trait for logging errors and converting to ApiError
pub trait LogErr<T> {
    /// Log error with context and return INTERNAL_SERVER_ERROR
    fn log_500(self, context: &str) -> Result<T, ApiError>;

    /// Log error with context and return a custom status
    fn log_status(self, context: &str, status: StatusCode) -> Result<T, ApiError>;
}

impl<T, E: std::fmt::Display> LogErr<T> for Result<T, E> {
    fn log_500(self, context: &str) -> Result<T, ApiError> {
        self.log_status(context, StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn log_status(self, context: &str, status: StatusCode) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::warn!("{}: {}", context, e);
            ApiError::new(status, e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_status_keeps_message() {
        let result: Result<(), PlatformError> = Err(PlatformError::NotFound("video not found".into()));
        let err = result
            .log_status("lookup failed", StatusCode::NOT_FOUND)
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "video not found");
    }

    #[test]
    fn test_platform_error_messages() {
        assert_eq!(
            PlatformError::MissingApiKey.to_string(),
            "YouTube API key not configured"
        );
        let status = PlatformError::UpstreamStatus {
            platform: "YouTube",
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(status.to_string(), "YouTube API error: status 403 Forbidden");
    }

    #[tokio::test]
    async fn test_api_error_body() {
        let response = ApiError::bad_request("query parameter is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "query parameter is required");
        assert_eq!(body.code, 400);
    }
}
