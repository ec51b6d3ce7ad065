// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod generate;
pub mod ingest;
pub mod metrics;
pub mod select;
pub mod synth;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::generate::{compose, GeneratedShort, Generator};
pub use crate::ingest::config::FeedConfig;
pub use crate::ingest::providers::RssFeedSource;
pub use crate::ingest::types::{FeedSource, NewsItem, RawFeedEntry, RawLink, RawSource};
pub use crate::ingest::Aggregator;

