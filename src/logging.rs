use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    LOGGER_INIT.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .compact()
            .with_target(true)
            .init();
    });
}

/// Default filter directive for development or production.
pub fn default_filter(development: bool) -> &'static str {
    if development {
        "multistream_api=debug,tower_http=debug,info"
    } else {
        "multistream_api=info,tower_http=info,warn"
    }
}
