//! Video generation request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::StockSource;

/// Maximum title length (characters).
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum script length (characters).
pub const MAX_SCRIPT_LENGTH: usize = 100_000;

/// Upper bound on the requested video length.
pub const MAX_TARGET_DURATION_MINUTES: f64 = 180.0;

fn default_target_duration() -> f64 {
    10.0
}

/// Caller-supplied parameters for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Video title
    #[serde(default)]
    pub title: String,

    /// Full script text
    #[serde(default)]
    pub script: String,

    /// Which stock provider(s) to search
    #[serde(default)]
    pub stock_source: StockSource,

    /// Desired video length in minutes
    #[serde(rename = "targetDuration", default = "default_target_duration")]
    pub target_duration_minutes: f64,

    /// Background music style, passed through to the compositor
    #[serde(default)]
    pub music_style: String,

    /// Whether captions were requested
    #[serde(default)]
    pub captions_enabled: bool,
}

impl GenerationRequest {
    pub fn new(title: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            script: script.into(),
            stock_source: StockSource::default(),
            target_duration_minutes: default_target_duration(),
            music_style: String::new(),
            captions_enabled: false,
        }
    }

    pub fn with_stock_source(mut self, source: StockSource) -> Self {
        self.stock_source = source;
        self
    }

    pub fn with_target_duration(mut self, minutes: f64) -> Self {
        self.target_duration_minutes = minutes;
        self
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }

        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(format!(
                "Title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            ));
        }

        if self.script.trim().is_empty() {
            return Err("Script is required".to_string());
        }

        if self.script.chars().count() > MAX_SCRIPT_LENGTH {
            return Err(format!(
                "Script exceeds maximum length of {} characters",
                MAX_SCRIPT_LENGTH
            ));
        }

        let minutes = self.target_duration_minutes;
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err("Target duration must be a positive number of minutes".to_string());
        }

        if minutes > MAX_TARGET_DURATION_MINUTES {
            return Err(format!(
                "Target duration exceeds maximum of {} minutes",
                MAX_TARGET_DURATION_MINUTES
            ));
        }

        Ok(())
    }
}
