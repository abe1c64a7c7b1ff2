//! Clip budgeting and duration accounting.

use stockreel_models::ClipPlan;

/// Floor on clips wanted per request.
pub const MIN_CLIPS: usize = 25;

/// Screen time assumed per clip.
pub const SECONDS_PER_CLIP: f64 = 15.0;

/// Narration speed used for script estimates.
pub const WORDS_PER_MINUTE: f64 = 150.0;

/// Total clips wanted for a target duration in minutes.
pub fn estimated_clips_needed(target_minutes: f64) -> usize {
    let by_duration = (target_minutes * 60.0 / SECONDS_PER_CLIP).ceil();
    if by_duration.is_finite() && by_duration > 0.0 {
        (by_duration as usize).max(MIN_CLIPS)
    } else {
        MIN_CLIPS
    }
}

/// Clip budget for `num_terms` search terms.
///
/// With no terms nothing can be fetched, so `clips_per_term` is zero.
pub fn plan_clips(target_minutes: f64, num_terms: usize) -> ClipPlan {
    let estimated_clips_needed = estimated_clips_needed(target_minutes);
    let clips_per_term = if num_terms == 0 {
        0
    } else {
        estimated_clips_needed.div_ceil(num_terms)
    };

    ClipPlan {
        estimated_clips_needed,
        clips_per_term,
    }
}

/// Narration length of a script in whole seconds.
pub fn estimate_script_duration(script: &str) -> u64 {
    let words = script.split_whitespace().count() as f64;
    (words * 60.0 / WORDS_PER_MINUTE).round() as u64
}

/// Output length in whole seconds. Assumed from the target, not measured.
pub fn actual_duration_seconds(target_minutes: f64) -> u64 {
    (target_minutes * 60.0).round().max(0.0) as u64
}

pub fn format_duration(seconds: u64) -> String {
    format!("{}s", seconds)
}
