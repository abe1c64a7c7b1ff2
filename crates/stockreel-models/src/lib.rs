//! Shared data models for the stockreel backend.
//!
//! This crate provides Serde-serializable types for:
//! - Stock providers and source selection
//! - Scenes and search terms extracted from a script
//! - Clip candidates and clip budgets
//! - The generation request/response wire format

pub mod clip;
pub mod request;
pub mod result;
pub mod scene;
pub mod source;

// Re-export common types
pub use clip::{ClipCandidate, ClipOrigin, ClipPlan};
pub use request::{GenerationRequest, MAX_SCRIPT_LENGTH, MAX_TARGET_DURATION_MINUTES, MAX_TITLE_LENGTH};
pub use result::{FailureResponse, GenerationResult, ProcessingDetails, ProcessingStatus};
pub use scene::{Scene, SearchTerm};
pub use source::{Provider, StockSource};
