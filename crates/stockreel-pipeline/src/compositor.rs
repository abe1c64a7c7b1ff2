//! Video composition.
//!
//! A [`Compositor`] turns the ordered clip list into the final video. The
//! default [`FirstClipCompositor`] renders nothing: it hands back the first
//! clip as the representative video.

use async_trait::async_trait;
use stockreel_models::ClipCandidate;

use crate::error::{PipelineError, PipelineResult};

/// Everything a compositor gets for one request.
#[derive(Debug, Clone, Copy)]
pub struct CompositionInput<'a> {
    pub title: &'a str,
    /// Ordered clips, provider clips first
    pub clips: &'a [ClipCandidate],
    pub target_duration_seconds: u64,
    pub music_style: &'a str,
    pub captions_enabled: bool,
}

/// The composed video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub video_url: String,
    pub duration_seconds: u64,
}

#[async_trait]
pub trait Compositor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn compose(&self, input: CompositionInput<'_>) -> PipelineResult<Composition>;
}

/// Uses the first clip as the video.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstClipCompositor;

impl FirstClipCompositor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Compositor for FirstClipCompositor {
    fn name(&self) -> &'static str {
        "first_clip"
    }

    async fn compose(&self, input: CompositionInput<'_>) -> PipelineResult<Composition> {
        let first = input
            .clips
            .first()
            .ok_or_else(|| PipelineError::composition_failed("No clips to compose"))?;

        Ok(Composition {
            video_url: first.url.clone(),
            duration_seconds: input.target_duration_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use stockreel_models::Provider;

    use super::*;

    fn input(clips: &[ClipCandidate]) -> CompositionInput<'_> {
        CompositionInput {
            title: "Forests",
            clips,
            target_duration_seconds: 600,
            music_style: "ambient",
            captions_enabled: false,
        }
    }

    #[tokio::test]
    async fn test_first_clip_is_video() {
        let clips = vec![
            ClipCandidate::from_provider("https://cdn.example/1.mp4", Provider::Pexels),
            ClipCandidate::fallback("https://cdn.example/2.mp4"),
        ];
        let composition = FirstClipCompositor::new().compose(input(&clips)).await.unwrap();

        assert_eq!(composition.video_url, "https://cdn.example/1.mp4");
        assert_eq!(composition.duration_seconds, 600);
    }

    #[tokio::test]
    async fn test_empty_clips_fail() {
        let err = FirstClipCompositor::new().compose(input(&[])).await.unwrap_err();
        assert!(matches!(err, PipelineError::CompositionFailed(_)));
    }
}
