// tests/providers_rss.rs
//
// Fixture-backed RSS source: XML decode, normalizer wiring, and the
// cross-feed dedupe using two Google News shaped documents.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use techspace_shorts::ingest::normalize::normalize;
use techspace_shorts::ingest::providers::parse_feed_xml;
use techspace_shorts::{Aggregator, FeedConfig, FeedSource, RawLink, RawSource, RssFeedSource};

const TECH_URL: &str = "https://feeds.test/tech";
const SPACE_URL: &str = "https://feeds.test/space";

const TECH_XML: &str = include_str!("fixtures/google_news_tech.xml");
const SPACE_XML: &str = include_str!("fixtures/google_news_space.xml");

fn fixture_source() -> RssFeedSource {
    RssFeedSource::from_fixtures([(TECH_URL, TECH_XML), (SPACE_URL, SPACE_XML)])
}

#[test]
fn tech_fixture_decodes_every_item() {
    let entries = parse_feed_xml(TECH_XML).expect("tech fixture parses");
    assert_eq!(entries.len(), 5);

    assert_eq!(
        entries[0].source,
        Some(RawSource::Attributed {
            url: Some("https://www.theverge.com".into()),
            name: Some("The Verge".into()),
        })
    );
    assert_eq!(entries[2].source, Some(RawSource::Plain("TechCrunch".into())));
    assert!(entries[3].link.is_none(), "orphan item has no link");
    assert!(entries[4].pub_date.is_none());
    assert_eq!(
        entries[4].title.as_deref(),
        Some("Quantum startup raises $200M round - Bloomberg")
    );
    assert_eq!(
        entries[1].link,
        Some(RawLink::Single("https://example.test/shared/starship".into()))
    );
}

#[tokio::test]
async fn unknown_fixture_url_is_an_error() {
    let src = fixture_source();
    assert!(src.fetch_feed("https://feeds.test/nope").await.is_err());
    assert_eq!(src.name(), "rss");
}

#[tokio::test]
async fn two_fixture_feeds_aggregate_into_ranked_shortlist() {
    let agg = Aggregator::new(
        Arc::new(fixture_source()),
        FeedConfig::with_feeds([TECH_URL, SPACE_URL]),
    );
    let items = agg.fetch_latest_items().await;

    // 5 + 3 raw, minus the linkless item, minus the upper-cased starship duplicate.
    assert_eq!(items.len(), 6);

    let titles: Vec<&str> = items.iter().map(|i| i.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Quantum startup raises $200M round - Bloomberg",
            "Artemis II crew begins final training - NASA",
            "SpaceX Starship clears FAA review - Reuters",
            "Apple unveils M5 chip - The Verge",
            "OpenAI ships new reasoning model | TechCrunch",
            "Hubble spots a rogue planet - Space.com",
        ]
    );

    let starship = &items[2];
    assert_eq!(starship.link(), "https://example.test/shared/starship");
    assert_eq!(starship.source(), "https://www.reuters.com");
    assert_eq!(
        starship.published_at(),
        Utc.with_ymd_and_hms(2025, 6, 9, 11, 0, 0).unwrap()
    );
    assert_eq!(items[4].source(), "TechCrunch");
}

#[tokio::test]
async fn dead_feed_among_fixtures_costs_only_its_items() {
    let agg = Aggregator::new(
        Arc::new(fixture_source()),
        FeedConfig::with_feeds(["https://feeds.test/offline", SPACE_URL]),
    );
    let items = agg.fetch_latest_items().await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title(), "Artemis II crew begins final training - NASA");
    assert_eq!(items[1].title(), "SPACEX STARSHIP CLEARS FAA REVIEW - REUTERS");
}

const SLOPPY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>sloppy</title>
  <item>
    <title>Interleaved links - Wire</title>
    <link>https://example.test/first</link>
    <guid isPermaLink="false">a</guid>
    <link>https://example.test/second</link>
    <pubDate>Mon, 09 Jun 2025 10:00:00 GMT</pubDate>
  </item>
  <lastBuildDate>Mon, 09 Jun 2025 12:00:00 GMT</lastBuildDate>
  <item>
    <title>Broken &bogus; entity</title>
    <link>https://example.test/broken</link>
  </item>
  <item>
    <title>Twice titled&hellip;</title>
    <title>second title</title>
    <link>https://example.test/twice</link>
  </item>
</channel></rss>"#;

#[test]
fn one_bad_item_does_not_sink_the_feed() {
    let entries = parse_feed_xml(SLOPPY_XML).expect("feed still parses");
    assert_eq!(entries.len(), 3);

    assert_eq!(
        entries[0].link,
        Some(RawLink::Many(vec![
            "https://example.test/first".into(),
            "https://example.test/second".into()
        ]))
    );
    assert_eq!(entries[2].title.as_deref(), Some("Twice titled…"));

    let now = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();
    let kept: Vec<_> = entries.iter().filter_map(|e| normalize(e, now)).collect();
    assert_eq!(kept.len(), 2, "only the undecodable item is rejected");
    assert_eq!(kept[0].link(), "https://example.test/first");
    assert_eq!(kept[1].link(), "https://example.test/twice");
}
