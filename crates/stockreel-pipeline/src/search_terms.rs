//! Keyword queries for stock searches.

use stockreel_models::{Scene, SearchTerm};

/// Keywords kept per query.
pub const MAX_KEYWORDS: usize = 5;

/// Words of this many characters or fewer are dropped.
pub const MIN_KEYWORD_CHARS: usize = 3;

pub const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "about", "what", "when", "where", "which", "would", "could",
    "should",
];

const STRIPPED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '\'', '"'];

/// Build the search query for one scene.
///
/// The query may be empty when every word is filtered out.
pub fn generate_search_term(scene: &Scene) -> SearchTerm {
    let cleaned: String = scene
        .text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    let keywords: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS)
        .filter(|word| !STOP_WORDS.contains(word))
        .take(MAX_KEYWORDS)
        .collect();

    SearchTerm::new(scene.index, keywords.join(" "))
}

/// One term per scene, in scene order.
pub fn generate_search_terms(scenes: &[Scene]) -> Vec<SearchTerm> {
    scenes.iter().map(generate_search_term).collect()
}
