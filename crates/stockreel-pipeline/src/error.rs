//! Pipeline error types.

use stockreel_models::Provider;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that fail a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Composition failed: {0}")]
    CompositionFailed(String),
}

impl PipelineError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn composition_failed(msg: impl Into<String>) -> Self {
        Self::CompositionFailed(msg.into())
    }

    /// Whether the caller sent something we cannot process.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::InvalidRequest(_))
    }
}

/// Errors from a single provider search.
///
/// These never fail a run; the affected term yields no clips.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} API key not configured")]
    MissingApiKey(Provider),

    #[error("{0} provider not registered")]
    NotRegistered(Provider),

    #[error("{provider} request failed: {source}")]
    Request {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider} rejected the search: {message}")]
    Rejected { provider: Provider, message: String },

    #[error("Failed to decode {provider} response: {message}")]
    Decode { provider: Provider, message: String },

    #[error("Provider call timed out after {0} seconds")]
    Timeout(u64),

    #[error("Fetch deadline exceeded")]
    DeadlineExceeded,

    #[error("Fetch cancelled")]
    Cancelled,
}

impl ProviderError {
    pub fn request(provider: Provider, source: reqwest::Error) -> Self {
        Self::Request { provider, source }
    }

    pub fn decode(provider: Provider, message: impl Into<String>) -> Self {
        Self::Decode {
            provider,
            message: message.into(),
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingApiKey(_) => "missing_key",
            ProviderError::NotRegistered(_) => "not_registered",
            ProviderError::Request { .. } => "request",
            ProviderError::Status { status: 401 | 403, .. } => "auth",
            ProviderError::Status { status: 429, .. } => "rate_limited",
            ProviderError::Status { .. } => "status",
            ProviderError::Rejected { .. } => "rejected",
            ProviderError::Decode { .. } => "decode",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::DeadlineExceeded => "deadline",
            ProviderError::Cancelled => "cancelled",
        }
    }
}
