//! Clip candidates and clip budgets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Provider;

/// Where a clip URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClipOrigin {
    /// Returned by a provider search
    Provider(Provider),
    /// Taken from the configured fallback pool
    Fallback,
}

impl ClipOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ClipOrigin::Fallback)
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            ClipOrigin::Provider(p) => Some(*p),
            ClipOrigin::Fallback => None,
        }
    }
}

/// A candidate media URL collected during a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClipCandidate {
    pub url: String,
    pub origin: ClipOrigin,
}

impl ClipCandidate {
    pub fn from_provider(url: impl Into<String>, provider: Provider) -> Self {
        Self {
            url: url.into(),
            origin: ClipOrigin::Provider(provider),
        }
    }

    pub fn fallback(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: ClipOrigin::Fallback,
        }
    }
}

/// Clip budget for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClipPlan {
    /// Total clips wanted for the target duration
    pub estimated_clips_needed: usize,
    /// Results to keep per search term; zero when there are no terms
    pub clips_per_term: usize,
}

impl ClipPlan {
    /// Upper bound on provider clips this plan can collect.
    pub fn capacity(&self, num_terms: usize) -> usize {
        self.clips_per_term * num_terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_origin() {
        let clip = ClipCandidate::from_provider("https://cdn.example/a.mp4", Provider::Pexels);
        assert_eq!(clip.origin.provider(), Some(Provider::Pexels));
        assert!(!clip.origin.is_fallback());

        let fallback = ClipCandidate::fallback("https://cdn.example/b.mp4");
        assert!(fallback.origin.is_fallback());
        assert_eq!(fallback.origin.provider(), None);
    }

    #[test]
    fn test_clip_origin_serialization() {
        let json = serde_json::to_value(ClipOrigin::Provider(Provider::Pixabay)).unwrap();
        assert_eq!(json, serde_json::json!({ "provider": "pixabay" }));
        let json = serde_json::to_value(ClipOrigin::Fallback).unwrap();
        assert_eq!(json, serde_json::json!("fallback"));
    }
}
