// src/synth/visuals.rs
use crate::ingest::types::NewsItem;
use crate::select::MAX_STORIES;
use crate::synth::clean_title_for_narration;

pub const END_CARD: &str = r#"End card: TechSpace AI logo with "Follow for daily updates""#;

/// One vertical-clip prompt per story (up to `MAX_STORIES`) plus the end card.
pub fn suggest_visuals(stories: &[NewsItem]) -> Vec<String> {
    stories
        .iter()
        .take(MAX_STORIES)
        .map(|s| {
            format!(
                r#"9:16 clip: dynamic headline animation for "{}", cosmic gradient background, subtle HUD lines"#,
                clean_title_for_narration(s.title())
            )
        })
        .chain(std::iter::once(END_CARD.to_string()))
        .collect()
}
