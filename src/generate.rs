// src/generate.rs
//! Query facade: shortlist → selection → every synthesizer, assembled into one payload.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;

use crate::ingest::config::FeedConfig;
use crate::ingest::types::{FeedSource, NewsItem};
use crate::ingest::Aggregator;
use crate::select::pick_top_stories;
use crate::synth::{
    make_hashtags, make_script, make_thumbnail_text, make_title, suggest_visuals, IntroPicker,
    RandomIntro,
};

/// Everything the page needs to render and narrate one short.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedShort {
    pub updated_at: DateTime<Utc>,
    pub items: Vec<NewsItem>,
    pub script: String,
    pub title: String,
    pub hashtags: Vec<String>,
    pub thumbnail_text: String,
    pub visuals: Vec<String>,
}

/// Pure assembly step, shared by [`Generator::generate`] and offline tools.
pub fn compose(
    shortlist: &[NewsItem],
    story_count: usize,
    intro: &dyn IntroPicker,
    updated_at: DateTime<Utc>,
) -> GeneratedShort {
    let picked = pick_top_stories(shortlist, story_count);
    GeneratedShort {
        updated_at,
        script: make_script(&picked, intro),
        title: make_title(&picked),
        hashtags: make_hashtags(&picked),
        thumbnail_text: make_thumbnail_text(&picked),
        visuals: suggest_visuals(&picked),
        items: picked,
    }
}

pub struct Generator {
    aggregator: Aggregator,
    intro: Arc<dyn IntroPicker>,
}

impl Generator {
    pub fn new(source: Arc<dyn FeedSource>, config: FeedConfig) -> Self {
        Self {
            aggregator: Aggregator::new(source, config),
            intro: Arc::new(RandomIntro),
        }
    }

    /// Pin the intro choice (tests, reproducible previews).
    pub fn with_intro_picker(mut self, intro: Arc<dyn IntroPicker>) -> Self {
        self.intro = intro;
        self
    }

    pub fn config(&self) -> &FeedConfig {
        self.aggregator.config()
    }

    /// Run the whole pipeline once. Feed outages only shrink the result;
    /// an error means no payload could be built at all.
    pub async fn generate(&self) -> Result<GeneratedShort> {
        counter!("generate_requests_total").increment(1);
        let cfg = self.config();
        if cfg.feeds.is_empty() {
            counter!("generate_errors_total").increment(1);
            bail!("no feed sources configured");
        }

        let shortlist = self.aggregator.fetch_latest_items().await;
        let short = compose(&shortlist, cfg.story_count, self.intro.as_ref(), Utc::now());

        tracing::info!(
            shortlist = shortlist.len(),
            stories = short.items.len(),
            title = %short.title,
            "short generated"
        );
        Ok(short)
    }
}
