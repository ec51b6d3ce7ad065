//! Runs the pipeline once against the configured feeds and prints the payload as JSON.

use std::sync::Arc;

use techspace_shorts::{FeedConfig, Generator, RssFeedSource};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    // stdout carries the payload; logs go to stderr. LOG_FORMAT=json for log shippers.
    let logs = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        logs.json().init();
    } else {
        logs.with_target(false).init();
    }

    let cfg = FeedConfig::load_default()?;
    let source = RssFeedSource::from_http(cfg.fetch_timeout(), &cfg.user_agent)?;
    let generator = Generator::new(Arc::new(source), cfg);
    tracing::info!(
        feeds = generator.config().feeds.len(),
        stories = generator.config().story_count,
        "generating once"
    );

    let short = generator.generate().await?;
    println!("{}", serde_json::to_string_pretty(&short)?);
    Ok(())
}
