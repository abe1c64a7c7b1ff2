//! Scene extraction.
//!
//! A scene is one "significant" sentence of the script. The script is split
//! at sentence-ending punctuation, short and structural sentences are
//! dropped, and an evenly spaced sample of the rest is kept.

use std::sync::LazyLock;

use regex::Regex;
use stockreel_models::Scene;

/// Upper bound on scenes per script.
pub const MAX_SCENES: usize = 30;

/// Sentences at or below this many characters are not scenes.
pub const MIN_SENTENCE_CHARS: usize = 20;

const SECTION_MARKERS: &[&str] = &["Introduction:", "Conclusion:"];

/// A sentence that is only `m:ss`, `mm:ss` or `h:mm:ss`, optionally bracketed.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?\d{1,2}:\d{2}(?::\d{2})?\]?$").expect("valid timestamp regex")
});

/// Extract scenes from a script, in script order.
pub fn extract_scenes(script: &str) -> Vec<Scene> {
    let candidates: Vec<(usize, &str)> = split_sentences(script)
        .into_iter()
        .enumerate()
        .filter(|(_, sentence)| is_significant(sentence))
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    let scenes_to_extract = MAX_SCENES.min(candidates.len().div_ceil(2));
    let step = candidates.len().div_ceil(scenes_to_extract);

    candidates
        .iter()
        .step_by(step)
        .take(scenes_to_extract)
        .map(|(index, text)| Scene::new(*index, *text))
        .collect()
}

/// Split on `.`, `!` or `?` followed by whitespace. The delimiter is not
/// part of either piece, and a terminator ending the script is dropped too.
/// Pieces are trimmed and empty ones dropped.
pub fn split_sentences(script: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = script.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                sentences.push(script[start..i].trim());
                start = i + c.len_utf8();
            }
        }
    }
    sentences.push(script[start..].trim().trim_end_matches(is_terminator));

    sentences.retain(|s| !s.is_empty());
    sentences
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_significant(sentence: &str) -> bool {
    sentence.chars().count() > MIN_SENTENCE_CHARS
        && !SECTION_MARKERS.iter().any(|m| sentence.contains(m))
        && !TIMESTAMP.is_match(sentence)
}
