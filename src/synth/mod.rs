// src/synth/mod.rs
//! Text synthesizers: each derives one artifact of the short from the selected stories.
//! All of them accept 0–3 stories and never fail; an empty selection yields a
//! well-defined fallback instead of an error.

pub mod hashtags;
pub mod script;
pub mod thumbnail;
pub mod title;
pub mod visuals;

use once_cell::sync::Lazy;
use regex::Regex;

pub use hashtags::make_hashtags;
pub use script::{make_script, FixedIntro, IntroPicker, RandomIntro};
pub use thumbnail::make_thumbnail_text;
pub use title::make_title;
pub use visuals::suggest_visuals;

pub const BRAND: &str = "TechSpace AI";
/// Joins several headlines into one line.
pub const SEPARATOR: &str = " • ";
/// Headline used when nothing was selected.
pub const EMPTY_HEADLINE: &str = "Tech & Space Roundup";

const ELLIPSIS: char = '…';

/// Cap `s` at `n` chars; a cut replaces the last kept char with `…`.
pub fn shorten(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        return s.to_string();
    }
    let mut out: String = s.chars().take(n.saturating_sub(1)).collect();
    if n > 0 {
        out.push(ELLIPSIS);
    }
    out
}

// Trailing " - Publisher" (spaced hyphen, so "Self-driving" survives) and " | Publisher".
static RE_DASH_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+-\s+[^-]+$").expect("dash suffix regex"));
static RE_PIPE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*[^|]+$").expect("pipe suffix regex"));

/// Drop publisher suffixes that read badly aloud.
pub fn clean_title_for_narration(title: &str) -> String {
    let no_dash = RE_DASH_SUFFIX.replace(title, "");
    let cleaned = RE_PIPE_SUFFIX.replace(&no_dash, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        title.trim().to_string()
    } else {
        cleaned.to_string()
    }
}
