use axum::extract::{Path, State};
use services::file_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /api/files/course/{course_id}
pub async fn files_for_course(State(app_state): State<AppState>, Path(course_id): Path<String>) -> ApiResult {
    let files = file_service::files_for_course(app_state.db(), &course_id).await?;
    Ok(ok(files, "Files retrieved successfully"))
}
