//! End-to-end generation run.

use std::sync::Arc;

use reqwest::Client;
use stockreel_models::{
    GenerationRequest, GenerationResult, ProcessingDetails, ProcessingStatus, Provider,
};
use tokio::sync::watch;
use tracing::Instrument;

use crate::compositor::{CompositionInput, Compositor, FirstClipCompositor};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::fetcher::StockMediaFetcher;
use crate::logging::RequestLogger;
use crate::metrics;
use crate::planner::{
    actual_duration_seconds, estimate_script_duration, format_duration, plan_clips,
};
use crate::providers::ProviderRegistry;
use crate::scenes::extract_scenes;
use crate::search_terms::generate_search_terms;

const USER_AGENT: &str = concat!("stockreel/", env!("CARGO_PKG_VERSION"));

/// Script to video pipeline.
///
/// Holds no per-request state; one instance serves every request.
pub struct VideoPipeline {
    registry: Arc<ProviderRegistry>,
    fetcher: StockMediaFetcher,
    compositor: Arc<dyn Compositor>,
}

impl VideoPipeline {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        compositor: Arc<dyn Compositor>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            fetcher: StockMediaFetcher::new(registry.clone(), config),
            registry,
            compositor,
        }
    }

    /// Build the pipeline with HTTP provider clients and the default compositor.
    pub fn from_config(config: &PipelineConfig) -> PipelineResult<Self> {
        let http = Client::builder()
            .timeout(config.provider_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PipelineError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        let registry = Arc::new(ProviderRegistry::from_config(config, http));
        Ok(Self::new(registry, Arc::new(FirstClipCompositor::new()), config))
    }

    /// Providers ready to search.
    pub fn configured_providers(&self) -> Vec<Provider> {
        self.registry.configured()
    }

    /// Run one generation request.
    ///
    /// Provider failures degrade the result instead of failing it; only an
    /// invalid request or a composition failure return an error.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        request_id: &str,
        cancel: watch::Receiver<bool>,
    ) -> PipelineResult<GenerationResult> {
        let logger = RequestLogger::new(request_id, "generate_video");
        let span = logger.create_span();
        self.run(request, cancel, &logger).instrument(span).await
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        cancel: watch::Receiver<bool>,
        logger: &RequestLogger,
    ) -> PipelineResult<GenerationResult> {
        logger.log_start(&format!(
            "'{}' from {} ({} min)",
            request.title, request.stock_source, request.target_duration_minutes
        ));

        request.validate().map_err(PipelineError::InvalidRequest)?;

        let scenes = extract_scenes(&request.script);
        let terms = generate_search_terms(&scenes);
        let plan = plan_clips(request.target_duration_minutes, terms.len());
        logger.log_progress(&format!(
            "Extracted {} scenes, need {} clips",
            scenes.len(),
            plan.estimated_clips_needed
        ));

        let outcome = self
            .fetcher
            .fetch_clips(&terms, request.stock_source, &plan, cancel, logger)
            .await;

        let estimated_seconds = estimate_script_duration(&request.script);
        let target_seconds = actual_duration_seconds(request.target_duration_minutes);

        let composition = match self
            .compositor
            .compose(CompositionInput {
                title: &request.title,
                clips: &outcome.clips,
                target_duration_seconds: target_seconds,
                music_style: &request.music_style,
                captions_enabled: request.captions_enabled,
            })
            .await
        {
            Ok(composition) => composition,
            Err(e) => {
                logger.log_error(&format!("{} compositor failed: {}", self.compositor.name(), e));
                metrics::record_generation("failed", outcome.is_degraded(), scenes.len());
                return Err(e);
            }
        };

        // The composed length is what the caller gets
        let actual_seconds = composition.duration_seconds;
        let degraded = outcome.is_degraded();
        let details = ProcessingDetails {
            status: ProcessingStatus::Completed,
            scenes_extracted: scenes.len(),
            stock_clips_used: outcome.clips.len(),
            estimated_duration: format_duration(estimated_seconds),
            actual_duration: actual_seconds,
            stock_source: request.stock_source,
            music_style: request.music_style.clone(),
            videos: outcome.urls(),
            search_terms: terms.into_iter().map(|t| t.query).collect(),
            fallback_clips_used: outcome.fallback_clips,
            degraded,
            duration_drift: actual_seconds as i64 - estimated_seconds as i64,
        };

        metrics::record_generation("completed", degraded, scenes.len());
        logger.log_completion(&format!(
            "{} clips, {} fallback, drift {}s",
            details.stock_clips_used, details.fallback_clips_used, details.duration_drift
        ));

        Ok(GenerationResult {
            video_url: composition.video_url,
            title: request.title.clone(),
            processing_details: details,
        })
    }
}
