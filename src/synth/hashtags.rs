// src/synth/hashtags.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingest::types::NewsItem;

pub const BASE_TAGS: [&str; 5] = ["#TechNews", "#Space", "#AI", "#Science", "#Shorts"];

const MAX_DERIVED: usize = 5;
const MAX_TOTAL: usize = 8;

static RE_NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("non-alnum regex"));

/// Derived tags first (≤5 across all stories), then the base set, deduped, ≤8 total.
/// The derived cap applies before the merge, so base tags are the ones that fall off.
pub fn make_hashtags(stories: &[NewsItem]) -> Vec<String> {
    let derived = stories
        .iter()
        .flat_map(|s| tags_from_title(s.title()));
    let derived = dedup_in_order(derived).into_iter().take(MAX_DERIVED);

    let merged = derived.chain(BASE_TAGS.iter().map(|t| t.to_string()));
    dedup_in_order(merged).into_iter().take(MAX_TOTAL).collect()
}

/// `"NASA's Artemis II crew"` → `["#Nasas", "#Artemis", "#Crew"]`
pub fn tags_from_title(title: &str) -> Vec<String> {
    RE_NON_ALNUM
        .replace_all(title, "")
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .map(|w| format!("#{}", capitalize(w)))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn dedup_in_order<I: IntoIterator<Item = String>>(tags: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in tags {
        if !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
