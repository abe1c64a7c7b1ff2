//! Video generation handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use stockreel_models::{GenerationRequest, GenerationResult};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestId;
use crate::security::{sanitize_string, sanitize_title};
use crate::state::AppState;

/// Generate a video from a script.
///
/// POST /api/generate-video
pub async fn generate_video(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    let Json(mut request) = payload.map_err(ApiError::from_json_rejection)?;

    request.title = sanitize_title(&request.title);
    request.script = sanitize_string(&request.script);
    request.music_style = sanitize_title(&request.music_style);

    let request_id = request_id
        .map(|Extension(id)| id.0)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let result = state
        .pipeline
        .generate(&request, &request_id, state.shutdown.clone())
        .await
        .map_err(|e| ApiError::from_pipeline(e, state.config.is_production()))?;

    Ok(Json(result))
}
