use axum::extract::{Path, State};
use services::grade_range_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /api/grade-ranges/grade/{grade_id}
///
/// Ranges ordered by `start_range`. `404` when the grade has none.
pub async fn ranges_for_grade(State(app_state): State<AppState>, Path(grade_id): Path<String>) -> ApiResult {
    let ranges = grade_range_service::ranges_for_grade(app_state.db(), &grade_id).await?;
    Ok(ok(ranges, "Grade ranges retrieved successfully"))
}
