// src/ingest/mod.rs
pub mod config;
pub mod normalize;
pub mod providers;
pub mod types;

use crate::ingest::config::FeedConfig;
use crate::ingest::normalize::normalize;
use crate::ingest::types::{FeedSource, NewsItem};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_fetch_total", "Feed fetches attempted.");
        describe_counter!(
            "feed_fetch_errors_total",
            "Feed fetches that failed or timed out."
        );
        describe_counter!(
            "feed_entries_rejected_total",
            "Raw entries dropped by the normalizer."
        );
        describe_counter!(
            "feed_items_deduped_total",
            "Items removed as case-insensitive title+link duplicates."
        );
        describe_histogram!("feed_fetch_ms", "Feed HTTP fetch time in milliseconds.");
        describe_gauge!("shortlist_len", "Length of the last shortlist.");
    });
}

/// Dedupe (first occurrence wins), sort newest first, cap.
/// Returns the shortlist and how many duplicates were dropped.
pub fn dedupe_and_rank(items: Vec<NewsItem>, cap: usize) -> (Vec<NewsItem>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let total = items.len();
    let mut unique: Vec<NewsItem> = items
        .into_iter()
        .filter(|it| seen.insert(it.dedup_key()))
        .collect();
    let dropped = total - unique.len();

    // Stable: equal timestamps keep feed/concatenation order.
    unique.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    unique.truncate(cap);
    (unique, dropped)
}

/// Best-effort fan-out over the configured feeds.
pub struct Aggregator {
    source: Arc<dyn FeedSource>,
    config: FeedConfig,
}

impl Aggregator {
    pub fn new(source: Arc<dyn FeedSource>, config: FeedConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch every feed concurrently, keep what succeeded, and shortlist it.
    /// A dead or slow feed only costs its own items; all failing yields an empty list.
    pub async fn fetch_latest_items(&self) -> Vec<NewsItem> {
        ensure_metrics_described();

        let timeout = self.config.fetch_timeout();
        let fetches = self.config.feeds.iter().map(|url| {
            let source = Arc::clone(&self.source);
            async move {
                counter!("feed_fetch_total").increment(1);
                let res = tokio::time::timeout(timeout, source.fetch_feed(url)).await;
                (url, res)
            }
        });
        let settled = join_all(fetches).await;

        let mut items = Vec::new();
        let mut rejected = 0usize;
        for (url, res) in settled {
            let entries = match res {
                Ok(Ok(entries)) => entries,
                Ok(Err(e)) => {
                    tracing::warn!(error = ?e, feed = %url, provider = self.source.name(), "feed error");
                    counter!("feed_fetch_errors_total").increment(1);
                    continue;
                }
                Err(_) => {
                    tracing::warn!(feed = %url, timeout_secs = timeout.as_secs_f64(), "feed timed out");
                    counter!("feed_fetch_errors_total").increment(1);
                    continue;
                }
            };

            let now = chrono::Utc::now();
            let before = items.len();
            items.extend(entries.iter().filter_map(|raw| normalize(raw, now)));
            let kept = items.len() - before;
            rejected += entries.len() - kept;
            tracing::debug!(feed = %url, entries = entries.len(), kept, "feed normalized");
        }

        let (shortlist, deduped) = dedupe_and_rank(items, self.config.shortlist_cap);

        counter!("feed_entries_rejected_total").increment(rejected as u64);
        counter!("feed_items_deduped_total").increment(deduped as u64);
        gauge!("shortlist_len").set(shortlist.len() as f64);
        tracing::info!(
            target: "ingest",
            kept = shortlist.len(),
            rejected,
            deduped,
            "aggregate fetch done"
        );

        shortlist
    }
}
