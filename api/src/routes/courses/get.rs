use axum::extract::{Path, State};
use services::course_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /api/courses
///
/// Every course with its derived `total_enrollment`.
pub async fn list_courses(State(app_state): State<AppState>) -> ApiResult {
    let courses = course_service::list_courses(app_state.db()).await?;
    Ok(ok(courses, "Courses retrieved successfully"))
}

/// GET /api/courses/{course_id}
pub async fn get_course(State(app_state): State<AppState>, Path(course_id): Path<String>) -> ApiResult {
    let course = course_service::get_course(app_state.db(), &course_id).await?;
    Ok(ok(course, "Course retrieved successfully"))
}

/// GET /api/courses/user/{user_id}
///
/// Courses whose codes the user is bound to.
pub async fn courses_for_user(State(app_state): State<AppState>, Path(user_id): Path<String>) -> ApiResult {
    let courses = course_service::courses_for_user(app_state.db(), &user_id).await?;
    Ok(ok(courses, "Courses retrieved successfully"))
}
