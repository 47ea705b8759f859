use axum::extract::{Path, State};
use services::grade_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/grades/{grade_id}
///
/// Removes the grade and its ranges. `400` while an assessment uses it.
pub async fn delete_grade(State(app_state): State<AppState>, Path(grade_id): Path<String>) -> ApiResult {
    grade_service::delete_grade(app_state.db(), &grade_id).await?;
    Ok(ok((), "Grade deleted successfully"))
}
