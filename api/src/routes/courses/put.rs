use axum::{
    Json,
    extract::{Path, State},
};
use services::course_service::{self, CourseInput};
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// PUT /api/courses/{course_id}
///
/// Partial update; the code stays unique across other courses.
pub async fn update_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<String>,
    Json(req): Json<CourseInput>,
) -> ApiResult {
    let course = course_service::update_course(app_state.db(), &course_id, req).await?;
    Ok(ok(course, "Course updated successfully"))
}
