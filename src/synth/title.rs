// src/synth/title.rs
use crate::ingest::types::NewsItem;
use crate::select::MAX_STORIES;
use crate::synth::{shorten, BRAND, EMPTY_HEADLINE, SEPARATOR};

const SINGLE_MAX: usize = 70;
const PART_MAX: usize = 30;

/// Video title; always ends with `" | TechSpace AI"`.
pub fn make_title(stories: &[NewsItem]) -> String {
    let headline = match stories {
        [] => EMPTY_HEADLINE.to_string(),
        [only] => shorten(only.title(), SINGLE_MAX),
        many => many
            .iter()
            .take(MAX_STORIES)
            .map(|s| s.title().split(':').next().unwrap_or_default())
            .map(|t| shorten(t, PART_MAX))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    };
    format!("{headline} | {BRAND}")
}
