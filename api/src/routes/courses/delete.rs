use axum::extract::{Path, State};
use services::course_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/courses/{course_id}
///
/// `400` while any assessment still references the course.
pub async fn delete_course(State(app_state): State<AppState>, Path(course_id): Path<String>) -> ApiResult {
    course_service::delete_course(app_state.db(), &course_id).await?;
    Ok(ok((), "Course deleted successfully"))
}
