use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use services::user_service::{self, UserUpdate};
use util::state::AppState;

use crate::response::{ApiResult, ok};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssignCoursesRequest {
    pub course_codes: Vec<String>,
}

/// PUT /api/users/{user_id}
///
/// Partial update. When `course_codes` is present it replaces the user's
/// course bindings.
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> ApiResult {
    let user = user_service::update_user(app_state.db(), &user_id, req).await?;
    Ok(ok(user, "User updated successfully"))
}

/// PUT /api/users/{user_id}/courses
///
/// Keeps codes that still have live assignments and merges in the supplied
/// codes that name existing courses.
pub async fn assign_courses(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<AssignCoursesRequest>,
) -> ApiResult {
    let user = user_service::assign_courses(app_state.db(), &user_id, &req.course_codes).await?;
    Ok(ok(user, "Courses assigned successfully"))
}
