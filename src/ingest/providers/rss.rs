// src/ingest/providers/rss.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::ingest::types::{FeedSource, RawFeedEntry, RawLink, RawSource};

/// One `<item>`. Repeatable fields are lists so a sloppy item still decodes.
#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    link: Vec<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<ItemSource>,
}

/// `<source url="https://…">Publisher</source>`
#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "@url")]
    url: Option<String>,
    #[serde(rename = "$text")]
    name: Option<String>,
}

impl From<Item> for RawFeedEntry {
    fn from(it: Item) -> Self {
        let link = match it.link.len() {
            0 => None,
            1 => it.link.into_iter().next().map(RawLink::Single),
            _ => Some(RawLink::Many(it.link)),
        };
        let source = it.source.map(|s| match s.url {
            Some(url) => RawSource::Attributed {
                url: Some(url),
                name: s.name,
            },
            None => RawSource::Plain(s.name.unwrap_or_default()),
        });
        RawFeedEntry {
            title: it.title.into_iter().next(),
            link,
            source,
            pub_date: it.pub_date,
        }
    }
}

/// Decode an RSS 2.0 document into raw entries. No filtering happens here.
///
/// Items are decoded one at a time: an item that fails to decode becomes an
/// empty entry (rejected later by the normalizer) instead of failing the feed.
pub fn parse_feed_xml(xml: &str) -> Result<Vec<RawFeedEntry>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let mut reader = Reader::from_str(&xml_clean);
    let mut saw_channel = false;
    let mut entries = Vec::new();

    loop {
        match reader.read_event().context("parsing rss xml")? {
            Event::Start(e) if e.name().as_ref() == b"channel" => saw_channel = true,
            Event::Start(e) if e.name().as_ref() == b"item" => {
                let span = reader
                    .read_to_end(e.name())
                    .context("parsing rss <item>")?;
                let body = usize::try_from(span.start)
                    .ok()
                    .zip(usize::try_from(span.end).ok())
                    .and_then(|(start, end)| xml_clean.get(start..end));
                entries.push(body.map(decode_item).unwrap_or_default());
            }
            Event::Empty(e) if e.name().as_ref() == b"item" => {
                entries.push(RawFeedEntry::default());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        bail!("parsing rss xml: no <channel> element");
    }
    Ok(entries)
}

fn decode_item(body: &str) -> RawFeedEntry {
    match from_str::<Item>(&format!("<item>{body}</item>")) {
        Ok(item) => item.into(),
        Err(e) => {
            tracing::debug!(error = %e, "undecodable rss item");
            RawFeedEntry::default()
        }
    }
}

/// RSS feed source over HTTP, or over canned documents keyed by URL.
pub struct RssFeedSource {
    mode: Mode,
}

enum Mode {
    Fixture(HashMap<String, String>),
    Http { client: reqwest::Client },
}

impl RssFeedSource {
    pub fn from_http(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("building feed http client")?;
        Ok(Self {
            mode: Mode::Http { client },
        })
    }

    /// Serve `(url, xml)` pairs from memory; unknown URLs fail like a dead feed.
    pub fn from_fixtures<I, U, X>(fixtures: I) -> Self
    where
        I: IntoIterator<Item = (U, X)>,
        U: Into<String>,
        X: Into<String>,
    {
        let map = fixtures
            .into_iter()
            .map(|(u, x)| (u.into(), x.into()))
            .collect();
        Self {
            mode: Mode::Fixture(map),
        }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<RawFeedEntry>> {
        match &self.mode {
            Mode::Fixture(map) => {
                let xml = map
                    .get(url)
                    .ok_or_else(|| anyhow!("no fixture registered for {url}"))?;
                parse_feed_xml(xml)
            }
            Mode::Http { client } => {
                let t0 = std::time::Instant::now();
                let body = fetch_body(client, url).await;
                // Failed fetches are timed too.
                histogram!("feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                parse_feed_xml(&body?)
            }
        }
    }

    fn name(&self) -> &'static str {
        "rss"
    }
}

async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<String> {
    client
        .get(url)
        .send()
        .await
        .context("feed http get()")?
        .error_for_status()
        .context("feed http non-2xx")?
        .text()
        .await
        .context("feed http .text()")
}

fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "…")
}
