//! Stock media providers and source selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete stock media provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Pixabay video search
    Pixabay,
    /// Pexels video search
    Pexels,
    /// Unsplash photo search
    Unsplash,
    /// Flickr photo search
    Flickr,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[
        Provider::Pixabay,
        Provider::Pexels,
        Provider::Unsplash,
        Provider::Flickr,
    ];

    /// Providers rotated through in mixed mode.
    /// Only video-capable providers take part; Unsplash and Flickr return stills.
    pub const MIXED_ROTATION: &'static [Provider] = &[Provider::Pixabay, Provider::Pexels];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Pixabay => "pixabay",
            Provider::Pexels => "pexels",
            Provider::Unsplash => "unsplash",
            Provider::Flickr => "flickr",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-selected stock source: one provider, or a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockSource {
    Pixabay,
    Pexels,
    Unsplash,
    Flickr,
    /// Round-robin across [`Provider::MIXED_ROTATION`]
    #[default]
    Mixed,
}

impl StockSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockSource::Pixabay => "pixabay",
            StockSource::Pexels => "pexels",
            StockSource::Unsplash => "unsplash",
            StockSource::Flickr => "flickr",
            StockSource::Mixed => "mixed",
        }
    }

    /// Provider to query for the term at `term_index`.
    pub fn provider_for_term(&self, term_index: usize) -> Provider {
        match self {
            StockSource::Pixabay => Provider::Pixabay,
            StockSource::Pexels => Provider::Pexels,
            StockSource::Unsplash => Provider::Unsplash,
            StockSource::Flickr => Provider::Flickr,
            StockSource::Mixed => {
                Provider::MIXED_ROTATION[term_index % Provider::MIXED_ROTATION.len()]
            }
        }
    }
}

impl fmt::Display for StockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
