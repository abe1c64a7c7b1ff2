//! Application state.

use std::sync::Arc;

use stockreel_pipeline::{PipelineConfig, PipelineResult, VideoPipeline};
use tokio::sync::watch;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<VideoPipeline>,
    /// Turns true on server shutdown; aborts in-flight provider fetches
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        pipeline: Arc<VideoPipeline>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            pipeline,
            shutdown,
        }
    }

    /// Create state with the pipeline configured from the environment.
    pub fn from_env(config: ApiConfig, shutdown: watch::Receiver<bool>) -> PipelineResult<Self> {
        let pipeline_config = PipelineConfig::from_env();
        let pipeline = VideoPipeline::from_config(&pipeline_config)?;
        Ok(Self::new(config, Arc::new(pipeline), shutdown))
    }
}
