//! TechSpace Shorts binary entrypoint.
//! Boots the Axum HTTP server: feed config, RSS source, generator, metrics.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use techspace_shorts::metrics::Metrics;
use techspace_shorts::{router, AppState, FeedConfig, Generator, RssFeedSource};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - TECHSPACE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("TECHSPACE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("techspace_shorts=debug,ingest=info,warn"));

    // Shuttle may already have installed a subscriber; keep theirs in that case.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = FeedConfig::load_default()?;
    tracing::info!(
        feeds = cfg.feeds.len(),
        timeout_secs = cfg.fetch_timeout_secs,
        shortlist_cap = cfg.shortlist_cap,
        "feed config loaded"
    );

    let metrics = Metrics::init(cfg.shortlist_cap)?;
    let source = RssFeedSource::from_http(cfg.fetch_timeout(), &cfg.user_agent)?;
    let state = AppState::new(Generator::new(Arc::new(source), cfg));

    let router = router(state).merge(metrics.router());

    Ok(router.into())
}
