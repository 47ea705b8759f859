use axum::extract::{Path, State};
use services::grade_range_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/grade-ranges/{range_id}
///
/// Removing the last range leaves the grade unconfigured.
pub async fn delete_range(State(app_state): State<AppState>, Path(range_id): Path<String>) -> ApiResult {
    grade_range_service::delete_range(app_state.db(), &range_id).await?;
    Ok(ok((), "Grade range deleted successfully"))
}
