//! Scenes and search terms derived from a script.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One significant sentence selected from a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Position of the sentence in the script's sentence sequence
    pub index: usize,
    /// Sentence text, trimmed
    pub text: String,
}

impl Scene {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Keyword query derived from a single scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchTerm {
    /// Index of the scene this term was derived from
    pub scene_index: usize,
    /// Space-joined keywords; may be empty
    pub query: String,
}

impl SearchTerm {
    pub fn new(scene_index: usize, query: impl Into<String>) -> Self {
        Self {
            scene_index,
            query: query.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.query.split_whitespace()
    }
}
