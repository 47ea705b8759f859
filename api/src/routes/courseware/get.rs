use axum::extract::{Path, State};
use services::courseware_service;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};

/// GET /api/courseware/courses
///
/// Courses the caller is bound to. Admins see every course.
pub async fn my_courses(State(app_state): State<AppState>, user: AuthUser) -> ApiResult {
    let courses = courseware_service::courses(app_state.db(), user.id(), user.role()).await?;
    Ok(ok(courses, "Courses retrieved successfully"))
}

/// GET /api/courseware/courses/{course_id}/assessments
///
/// The caller's assignments in the course, with assessment name and type.
pub async fn my_assessments(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<String>,
) -> ApiResult {
    let assessments = courseware_service::assessments(app_state.db(), user.id(), &course_id).await?;
    Ok(ok(assessments, "Assessments retrieved successfully"))
}
