pub mod meta;
pub mod search;
pub mod stream;

use axum::Router;
use std::sync::Arc;

use crate::AppState;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(meta::routes())
        .merge(search::routes())
        .merge(stream::routes())
}
