// src/synth/script.rs
use rand::Rng;

use crate::ingest::types::NewsItem;
use crate::select::MAX_STORIES;
use crate::synth::{clean_title_for_narration, shorten};

pub const INTROS: [&str; 3] = [
    "Did you know?",
    "Quick tech & space update!",
    "Here's what's new in the last 24 hours:",
];
pub const OUTRO: &str = "Follow for daily TechSpace AI updates!";
pub const MAX_SCRIPT_CHARS: usize = 900;

/// Chooses which intro line opens the script.
pub trait IntroPicker: Send + Sync {
    /// Index in `0..options` (`options` is never 0).
    fn pick(&self, options: usize) -> usize;
}

/// Uniform random choice; the production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIntro;

impl IntroPicker for RandomIntro {
    fn pick(&self, options: usize) -> usize {
        rand::rng().random_range(0..options)
    }
}

/// Always the same intro (index wraps around).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIntro(pub usize);

impl IntroPicker for FixedIntro {
    fn pick(&self, options: usize) -> usize {
        self.0 % options
    }
}

/// Narration for the voice-over: intro, one bullet per story, outro; ≤900 chars.
pub fn make_script(stories: &[NewsItem], intro: &dyn IntroPicker) -> String {
    let idx = intro.pick(INTROS.len()).min(INTROS.len() - 1);

    let mut lines: Vec<String> = Vec::with_capacity(MAX_STORIES + 2);
    lines.push(INTROS[idx].to_string());
    for s in stories.iter().take(MAX_STORIES) {
        let by = if s.source().is_empty() {
            String::new()
        } else {
            format!(" — via {}", s.source())
        };
        lines.push(format!("• {}{by}.", clean_title_for_narration(s.title())));
    }
    lines.push(OUTRO.to_string());

    shorten(&lines.join("\n"), MAX_SCRIPT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OutOfRange;
    impl IntroPicker for OutOfRange {
        fn pick(&self, _options: usize) -> usize {
            99
        }
    }

    #[test]
    fn picker_index_is_guarded() {
        let script = make_script(&[], &OutOfRange);
        assert!(script.starts_with(INTROS[2]));
    }

    #[test]
    fn random_intro_stays_in_range() {
        for _ in 0..50 {
            assert!(RandomIntro.pick(3) < 3);
        }
    }
}
