// src/select.rs
use crate::ingest::types::NewsItem;

pub const MAX_STORIES: usize = 3;

/// First `clamp(count, 1, 3)` items of an already-ranked shortlist.
pub fn pick_top_stories(items: &[NewsItem], count: usize) -> Vec<NewsItem> {
    let n = count.clamp(1, MAX_STORIES);
    items.iter().take(n).cloned().collect()
}
