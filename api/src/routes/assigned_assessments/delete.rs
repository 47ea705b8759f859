use axum::extract::{Path, State};
use services::assignment_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/assigned-assessments/{assignment_id}
pub async fn delete_assignment(State(app_state): State<AppState>, Path(assignment_id): Path<String>) -> ApiResult {
    assignment_service::delete(app_state.db(), &assignment_id).await?;
    Ok(ok((), "Assigned assessment deleted successfully"))
}
