// tests/ingest_config.rs
use std::fs;
use std::path::Path;

use techspace_shorts::ingest::config::DEFAULT_FEEDS;
use techspace_shorts::FeedConfig;

#[test]
fn shipped_config_matches_builtin_defaults() {
    let p = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/feeds.toml");
    let cfg = FeedConfig::load_from(&p).expect("config/feeds.toml loads");
    assert_eq!(cfg, FeedConfig::default());
    assert_eq!(cfg.feeds, DEFAULT_FEEDS.to_vec());
}

#[test]
fn load_from_toml_and_json_files() {
    let dir = tempfile::tempdir().unwrap();

    let toml_p = dir.path().join("feeds.toml");
    fs::write(
        &toml_p,
        r#"
feeds = ["https://b.test/rss", "https://a.test/rss"]
shortlist_cap = 5
story_count = 2
"#,
    )
    .unwrap();
    let cfg = FeedConfig::load_from(&toml_p).unwrap();
    assert_eq!(cfg.feeds, vec!["https://b.test/rss", "https://a.test/rss"]);
    assert_eq!(cfg.shortlist_cap, 5);
    assert_eq!(cfg.story_count, 2);
    assert_eq!(cfg.fetch_timeout_secs, 10);

    let json_p = dir.path().join("feeds.json");
    fs::write(&json_p, r#"{"feeds": ["http://c.test/rss"], "user_agent": "ua/1"}"#).unwrap();
    let cfg = FeedConfig::load_from(&json_p).unwrap();
    assert_eq!(cfg.feeds, vec!["http://c.test/rss"]);
    assert_eq!(cfg.user_agent, "ua/1");
}

#[test]
fn invalid_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();

    let empty = dir.path().join("empty.toml");
    fs::write(&empty, "feeds = [\"  \"]").unwrap();
    assert!(FeedConfig::load_from(&empty).is_err());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ feeds: ").unwrap();
    assert!(FeedConfig::load_from(&broken).is_err());

    assert!(FeedConfig::load_from(&dir.path().join("missing.toml")).is_err());
}
