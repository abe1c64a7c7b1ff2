//! Video generation response.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::StockSource;

/// Terminal status reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Completed,
    Failed,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-run processing summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingDetails {
    pub status: ProcessingStatus,

    /// Scenes selected from the script
    pub scenes_extracted: usize,

    /// Clip URLs in `videos`
    pub stock_clips_used: usize,

    /// Word-count estimate, rendered as `"<seconds>s"`
    pub estimated_duration: String,

    /// Assumed output length in seconds (target duration, not measured)
    pub actual_duration: u64,

    pub stock_source: StockSource,

    pub music_style: String,

    /// Ordered clip URLs
    pub videos: Vec<String>,

    /// One query per scene, in scene order
    #[serde(default)]
    pub search_terms: Vec<String>,

    /// How many entries of `videos` came from the fallback pool
    #[serde(default)]
    pub fallback_clips_used: usize,

    /// True when fallback footage was needed to fill the result
    #[serde(default)]
    pub degraded: bool,

    /// `actualDuration` minus the word-count estimate, in seconds
    #[serde(default)]
    pub duration_drift: i64,
}

/// Successful generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub video_url: String,
    pub title: String,
    pub processing_details: ProcessingDetails,
}

/// Body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FailureResponse {
    pub error: String,
    pub status: ProcessingStatus,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: ProcessingStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_wire_format() {
        let result = GenerationResult {
            video_url: "https://cdn.example/1.mp4".to_string(),
            title: "Ocean".to_string(),
            processing_details: ProcessingDetails {
                status: ProcessingStatus::Completed,
                scenes_extracted: 3,
                stock_clips_used: 2,
                estimated_duration: "12s".to_string(),
                actual_duration: 600,
                stock_source: StockSource::Mixed,
                music_style: "calm".to_string(),
                videos: vec![
                    "https://cdn.example/1.mp4".to_string(),
                    "https://cdn.example/2.mp4".to_string(),
                ],
                search_terms: vec!["ocean waves".to_string()],
                fallback_clips_used: 0,
                degraded: false,
                duration_drift: 588,
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["videoUrl"], "https://cdn.example/1.mp4");
        let details = &json["processingDetails"];
        assert_eq!(details["status"], "completed");
        assert_eq!(details["scenesExtracted"], 3);
        assert_eq!(details["stockClipsUsed"], 2);
        assert_eq!(details["estimatedDuration"], "12s");
        assert_eq!(details["actualDuration"], 600);
        assert_eq!(details["stockSource"], "mixed");
        assert_eq!(details["musicStyle"], "calm");
        assert_eq!(details["videos"].as_array().unwrap().len(), 2);
        assert_eq!(details["durationDrift"], 588);
    }

    #[test]
    fn test_failure_response() {
        let json = serde_json::to_value(FailureResponse::new("Title is required")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "Title is required", "status": "failed" })
        );
    }
}
