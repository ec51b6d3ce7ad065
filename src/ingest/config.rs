// src/ingest/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PATH: &str = "FEEDS_CONFIG_PATH";

pub const DEFAULT_FEEDS: [&str; 2] = [
    "https://news.google.com/rss/search?q=technology+when:1d&hl=en-US&gl=US&ceid=US:en",
    "https://news.google.com/rss/search?q=space+exploration+when:1d&hl=en-US&gl=US&ceid=US:en",
];

fn default_feeds() -> Vec<String> {
    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_shortlist_cap() -> usize {
    12
}
fn default_story_count() -> usize {
    3
}
fn default_user_agent() -> String {
    "TechSpaceShorts/0.1 (+rss)".to_string()
}

/// Ordered feed list plus the pipeline knobs around it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedConfig {
    /// Feed order matters: on duplicates the earlier feed wins.
    #[serde(default = "default_feeds")]
    pub feeds: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_shortlist_cap")]
    pub shortlist_cap: usize,
    #[serde(default = "default_story_count")]
    pub story_count: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            fetch_timeout_secs: default_timeout_secs(),
            shortlist_cap: default_shortlist_cap(),
            story_count: default_story_count(),
            user_agent: default_user_agent(),
        }
    }
}

impl FeedConfig {
    /// Config with the given feeds and default knobs (handy for tests and tools).
    pub fn with_feeds<I, S>(feeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feeds: feeds.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feed config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing feed config {}", path.display()))
    }

    /// Load using env var + fallbacks:
    /// 1) $FEEDS_CONFIG_PATH
    /// 2) config/feeds.toml
    /// 3) config/feeds.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_PATH} points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from("config/feeds.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/feeds.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    /// Trim + dedupe feed URLs (order kept) and reject values the pipeline cannot run with.
    pub fn validated(mut self) -> Result<Self> {
        self.feeds = clean_list(self.feeds);
        if self.feeds.is_empty() {
            bail!("feed config lists no feeds");
        }
        for feed in &self.feeds {
            let url = reqwest::Url::parse(feed).with_context(|| format!("invalid feed url {feed}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("feed url must be http(s): {feed}");
            }
        }
        if self.fetch_timeout_secs == 0 {
            bail!("fetch_timeout_secs must be > 0");
        }
        if self.shortlist_cap == 0 {
            bail!("shortlist_cap must be >= 1");
        }
        Ok(self)
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    let parsed = match hint_ext {
        "toml" => parse_toml(s),
        "json" => parse_json(s),
        _ => parse_toml(s).or_else(|_| parse_json(s)),
    }?;
    parsed.validated()
}

fn parse_toml(s: &str) -> Result<FeedConfig> {
    Ok(toml::from_str(s)?)
}

fn parse_json(s: &str) -> Result<FeedConfig> {
    Ok(serde_json::from_str(s)?)
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|seen| seen == t) {
            out.push(t.to_string());
        }
    }
    out
}
