//! CORS policy for the browser frontend

use axum::http::{HeaderValue, Method, header, request::Parts};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::constants::CORS_MAX_AGE_SECS;

/// Configured origins, plus any `http://localhost:<port>` dev server.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let allowed = config.cors_allowed_origins.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| allowed.iter().any(|a| a == o) || is_localhost_origin(o))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS))
}

fn is_localhost_origin(origin: &str) -> bool {
    origin
        .strip_prefix("http://localhost:")
        .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_origins() {
        assert!(is_localhost_origin("http://localhost:3000"));
        assert!(is_localhost_origin("http://localhost:5173"));
        assert!(!is_localhost_origin("http://localhost"));
        assert!(!is_localhost_origin("http://localhost:"));
        assert!(!is_localhost_origin("http://localhost:3000.evil.com"));
        assert!(!is_localhost_origin("https://localhost:3000"));
    }
}
