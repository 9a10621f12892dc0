mod config;
mod constants;
mod cors;
mod logging;
mod models;
mod routes;
mod services;

use anyhow::Context;
use axum::{
    Router,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use config::Config;
use services::error::{ApiError, PlatformError};
use services::kick::KickClient;
use services::youtube::YouTubeClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub youtube: YouTubeClient,
    pub kick: KickClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PlatformError> {
        Ok(Self {
            youtube: YouTubeClient::new(&config)?,
            kick: KickClient::new(&config)?,
            config,
        })
    }
}

/// Routes plus the tracing, panic and CORS layers.
pub fn build_app(state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors::cors_layer(&state.config));

    routes::build_routes().layer(middleware).with_state(state)
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::internal("internal server error").into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    logging::init(logging::default_filter(config.is_development()));

    let state = Arc::new(AppState::new(config).context("Failed to build HTTP clients")?);

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(
        "MultiStream backend listening on http://{} ({})",
        addr,
        state.config.environment
    );
    if state.youtube.is_configured() {
        tracing::info!("YouTube API: configured");
    } else {
        tracing::warn!("YouTube API: not configured (set YOUTUBE_API_KEY)");
    }
    tracing::info!("Kick API: enabled (unofficial)");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    Ok(())
}

#[cfg(test)]
mod test_support {
    use axum_test::TestServer;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::{AppState, build_app};

    pub fn test_server(config: Config) -> TestServer {
        let state = Arc::new(AppState::new(config).unwrap());
        TestServer::new(build_app(state)).unwrap()
    }
}
