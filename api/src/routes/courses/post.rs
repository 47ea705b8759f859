use axum::{Json, extract::State};
use services::course_service::{self, CourseInput};
use util::state::AppState;

use crate::response::{ApiResult, created};

/// POST /api/courses
///
/// ### Request Body
/// ```json
/// {
///   "name": "Business Management",
///   "code": "BUS101",
///   "visibility": "public",
///   "start_date": "2026-01-15T00:00:00Z",
///   "end_date": "2026-06-30T00:00:00Z",
///   "description": "Optional"
/// }
/// ```
///
/// ### Errors
/// - `400` for missing fields, `start_date > end_date` or a duplicate code
pub async fn create_course(State(app_state): State<AppState>, Json(req): Json<CourseInput>) -> ApiResult {
    let course = course_service::create_course(app_state.db(), req).await?;
    Ok(created(course, "Course created successfully"))
}
