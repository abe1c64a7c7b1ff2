//! API error types.
//!
//! Every error renders as `{ "error": ..., "status": "failed" }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use stockreel_models::FailureResponse;
use stockreel_pipeline::PipelineError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Rate limited")]
    RateLimited,

    /// Server-side failure. The message is already safe to return.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Map a JSON body rejection to the failure contract.
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }

    /// Map a failed run. Invalid requests keep their message; anything else
    /// is logged in full and, in production, answered with a generic message.
    pub fn from_pipeline(err: PipelineError, production: bool) -> Self {
        match err {
            PipelineError::InvalidRequest(msg) => Self::BadRequest(msg),
            err => {
                tracing::error!(error = %err, "Generation failed");
                if production {
                    Self::Internal(INTERNAL_ERROR_MESSAGE.to_string())
                } else {
                    Self::Internal(err.to_string())
                }
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = FailureResponse::new(self.public_message());
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from_pipeline(PipelineError::invalid_request("Title is required"), false)
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from_pipeline(PipelineError::composition_failed("no clips"), false)
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_internals_hidden_in_production() {
        let err = || PipelineError::composition_failed("renderer at 10.0.0.3 down");
        assert_eq!(
            ApiError::from_pipeline(err(), true).public_message(),
            INTERNAL_ERROR_MESSAGE
        );
        assert!(ApiError::from_pipeline(err(), false)
            .public_message()
            .contains("renderer"));

        let err = ApiError::from_pipeline(PipelineError::invalid_request("Script is required"), true);
        assert_eq!(err.public_message(), "Script is required");
    }
}
