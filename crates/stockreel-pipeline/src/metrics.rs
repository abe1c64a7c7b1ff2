//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade; the API binary installs the
//! Prometheus recorder. Without a recorder these calls are no-ops.

use metrics::{counter, histogram};
use stockreel_models::Provider;

/// Metric names as constants for consistency.
pub mod names {
    pub const PROVIDER_CALLS_TOTAL: &str = "stockreel_provider_calls_total";
    pub const PROVIDER_CALL_DURATION_SECONDS: &str = "stockreel_provider_call_duration_seconds";
    pub const PROVIDER_CLIPS_TOTAL: &str = "stockreel_provider_clips_total";
    pub const FALLBACK_CLIPS_TOTAL: &str = "stockreel_fallback_clips_total";
    pub const GENERATIONS_TOTAL: &str = "stockreel_generations_total";
    pub const SCENES_EXTRACTED: &str = "stockreel_scenes_extracted";
}

/// Record the outcome of one provider search.
pub fn record_provider_call(provider: Provider, outcome: &str, duration_secs: f64) {
    let labels = [
        ("provider", provider.as_str().to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::PROVIDER_CALLS_TOTAL, &labels).increment(1);
    histogram!(names::PROVIDER_CALL_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record clips returned by a provider.
pub fn record_provider_clips(provider: Provider, count: usize) {
    let labels = [("provider", provider.as_str().to_string())];
    counter!(names::PROVIDER_CLIPS_TOTAL, &labels).increment(count as u64);
}

/// Record fallback clips served.
pub fn record_fallback_clips(count: usize) {
    counter!(names::FALLBACK_CLIPS_TOTAL).increment(count as u64);
}

/// Record a finished generation run.
pub fn record_generation(status: &str, degraded: bool, scenes: usize) {
    let labels = [
        ("status", status.to_string()),
        ("degraded", degraded.to_string()),
    ];
    counter!(names::GENERATIONS_TOTAL, &labels).increment(1);
    histogram!(names::SCENES_EXTRACTED).record(scenes as f64);
}
