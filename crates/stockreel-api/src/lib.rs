//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /api/generate-video` over the stock-footage pipeline
//! - Health and readiness probes
//! - Rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
