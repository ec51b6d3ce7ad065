// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical, immutable news record produced by the normalizer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    title: String,
    link: String,
    source: String,
    published_at: DateTime<Utc>,
}

impl NewsItem {
    /// Returns `None` when `title` or `link` is blank.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Option<Self> {
        let title = title.into();
        let link = link.into();
        if title.trim().is_empty() || link.trim().is_empty() {
            return None;
        }
        Some(Self {
            title,
            link,
            source: source.into(),
            published_at,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Case-insensitive `(title, link)` key used for deduplication.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.title, self.link).to_lowercase()
    }
}

/// `link` as found in the wild: a scalar, a list of candidates, or junk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawLink {
    Single(String),
    Many(Vec<String>),
    Other(serde_json::Value),
}

/// `source` either carries attributes (`<source url="…">Name</source>`) or is plain text.
/// XML-to-JSON converters put attributes under `$` and the text under `_`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawSource {
    Plain(String),
    Nested {
        #[serde(rename = "$")]
        attrs: SourceAttrs,
        #[serde(rename = "_", default)]
        text: Option<String>,
    },
    Attributed {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

/// Attribute map of a nested `source`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SourceAttrs {
    #[serde(default)]
    pub url: Option<String>,
}

/// One untrusted entry as handed over by a [`FeedSource`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawFeedEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<RawLink>,
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub pub_date: Option<String>,
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and decode one feed. Any error is treated as a per-feed failure.
    async fn fetch_feed(&self, url: &str) -> Result<Vec<RawFeedEntry>>;
    fn name(&self) -> &'static str;
}
