// src/synth/thumbnail.rs
use crate::ingest::types::NewsItem;
use crate::synth::{clean_title_for_narration, shorten, EMPTY_HEADLINE, SEPARATOR};

pub const MAX_THUMBNAIL_CHARS: usize = 48;

/// Caption burned into the thumbnail. The 48-char cap applies to the joined line.
pub fn make_thumbnail_text(stories: &[NewsItem]) -> String {
    let text = match stories {
        [] => EMPTY_HEADLINE.to_string(),
        [only] => clean_title_for_narration(only.title()),
        many => many
            .iter()
            .take(2)
            .map(|s| clean_title_for_narration(s.title()))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    };
    shorten(&text, MAX_THUMBNAIL_CHARS)
}
