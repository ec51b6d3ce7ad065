// tests/metrics.rs
// Installs the global Prometheus recorder, so it runs only with --features strict-metrics.
#![cfg(feature = "strict-metrics")]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use techspace_shorts::metrics::Metrics;
use techspace_shorts::{FeedConfig, FeedSource, Generator, RssFeedSource};

const TECH_URL: &str = "https://feeds.test/tech";

#[tokio::test]
async fn metrics_exposes_pipeline_series() {
    let metrics = Metrics::init(12).expect("install recorder");

    let source =
        RssFeedSource::from_fixtures([(TECH_URL, include_str!("fixtures/google_news_tech.xml"))]);
    let generator = Generator::new(
        Arc::new(source),
        FeedConfig::with_feeds([TECH_URL, "https://feeds.test/down"]),
    );
    generator.generate().await.expect("generate ok");

    // Nothing listens on the discard port; the failed fetch must still be timed.
    let http = RssFeedSource::from_http(Duration::from_secs(2), "techspace-test/0.1")
        .expect("http client");
    assert!(http.fetch_feed("http://127.0.0.1:9/rss").await.is_err());

    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let resp = metrics.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), 1 << 20).await.unwrap();
    let text = String::from_utf8_lossy(&bytes);

    for series in [
        "generate_requests_total",
        "feed_fetch_total",
        "feed_fetch_errors_total",
        "feed_entries_rejected_total",
        "shortlist_len",
        "shortlist_cap",
        "feed_fetch_ms_count",
    ] {
        assert!(text.contains(series), "missing {series} in:\n{text}");
    }
}
