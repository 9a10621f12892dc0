//! Service descriptor and health endpoints (/, /api/health, /api/hello)

use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(describe))
        .route("/api/health", get(health))
        .route("/api/hello", get(hello))
}

#[derive(Serialize)]
struct ServiceDescriptor {
    name: &'static str,
    version: &'static str,
    endpoints: [&'static str; 3],
}

/// GET / - What this service is and what it serves
async fn describe() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        name: "MultiStream API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: [
            "GET /api/v1/search?platform={platform}&query={query}",
            "GET /api/v1/stream/{platform}/{id}",
            "GET /api/health",
        ],
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
struct HelloResponse {
    message: &'static str,
    status: &'static str,
}

/// GET /api/hello - Legacy greeting kept for older frontends
async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from MultiStream Rust Backend!",
        status: "ok",
    })
}
