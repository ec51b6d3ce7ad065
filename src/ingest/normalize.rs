// src/ingest/normalize.rs
//! Raw feed entry → [`NewsItem`]. Malformed entries are rejected, never raised.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingest::types::{NewsItem, RawFeedEntry, RawLink, RawSource};

pub const FALLBACK_SOURCE: &str = "Google News";

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Convert one raw entry into a canonical item, or `None` when title/link are missing.
/// `now` stands in for absent or unparseable publish dates.
pub fn normalize(raw: &RawFeedEntry, now: DateTime<Utc>) -> Option<NewsItem> {
    let title = clean_title(raw.title.as_deref()?);
    let link = resolve_link(raw.link.as_ref()?);
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let source = resolve_source(raw.source.as_ref());
    let published_at = raw
        .pub_date
        .as_deref()
        .and_then(parse_pub_date)
        .unwrap_or(now);

    NewsItem::new(title, link, source, published_at)
}

/// Decode leftover entities (`&amp;#39;` survives one XML pass) and fold whitespace.
fn clean_title(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    RE_WS.replace_all(decoded.trim(), " ").into_owned()
}

fn resolve_link(link: &RawLink) -> String {
    let first = match link {
        RawLink::Single(s) => s.as_str(),
        RawLink::Many(v) => v.first().map(String::as_str).unwrap_or_default(),
        RawLink::Other(_) => "",
    };
    first.trim().to_string()
}

fn resolve_source(source: Option<&RawSource>) -> String {
    let non_empty = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let resolved = match source {
        Some(RawSource::Nested { attrs, text }) => {
            non_empty(&attrs.url).or_else(|| non_empty(text))
        }
        Some(RawSource::Attributed { url, name }) => non_empty(url).or_else(|| non_empty(name)),
        Some(RawSource::Plain(s)) => Some(s.trim().to_string()).filter(|v| !v.is_empty()),
        Some(RawSource::Other(_)) | None => None,
    };
    resolved.unwrap_or_else(|| FALLBACK_SOURCE.to_string())
}

/// RSS `pubDate` is RFC 2822; Atom-ish feeds and hand-written fixtures use RFC 3339.
pub fn parse_pub_date(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
