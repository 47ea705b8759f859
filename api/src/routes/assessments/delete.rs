use axum::extract::{Path, State};
use services::assessment_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/assessments/{assessment_id}
///
/// Deletes the assessment and its questions. `400` once it has been assigned.
pub async fn delete_assessment(State(app_state): State<AppState>, Path(assessment_id): Path<String>) -> ApiResult {
    assessment_service::delete_assessment(app_state.db(), &assessment_id).await?;
    Ok(ok((), "Assessment deleted successfully"))
}
