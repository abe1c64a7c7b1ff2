//! Script to stock-footage pipeline.
//!
//! This crate provides:
//! - Scene extraction and keyword generation from a script
//! - Stock provider clients (Pixabay, Pexels, Unsplash, Flickr)
//! - Bounded concurrent clip fetching with fallback footage
//! - Clip budgeting, duration accounting and composition

pub mod compositor;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod planner;
pub mod providers;
pub mod scenes;
pub mod search_terms;

pub use compositor::{Composition, CompositionInput, Compositor, FirstClipCompositor};
pub use config::{PipelineConfig, ProviderCredentials, ProviderEndpoints, DEFAULT_FALLBACK_CLIPS};
pub use error::{PipelineError, PipelineResult, ProviderError, ProviderResult};
pub use fetcher::{FetchOutcome, StockMediaFetcher};
pub use logging::RequestLogger;
pub use pipeline::VideoPipeline;
pub use planner::plan_clips;
pub use providers::{ProviderRegistry, StockProvider};
pub use scenes::extract_scenes;
pub use search_terms::{generate_search_term, generate_search_terms};
