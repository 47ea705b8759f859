use axum::extract::{Path, State};
use services::grade_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /api/grades
pub async fn list_grades(State(app_state): State<AppState>) -> ApiResult {
    let grades = grade_service::list_grades(app_state.db(), false).await?;
    Ok(ok(grades, "Grades retrieved successfully"))
}

/// GET /api/grades/configured
///
/// Only grades with at least one range, i.e. usable by an assessment.
pub async fn list_configured_grades(State(app_state): State<AppState>) -> ApiResult {
    let grades = grade_service::list_grades(app_state.db(), true).await?;
    Ok(ok(grades, "Configured grades retrieved successfully"))
}

/// GET /api/grades/{grade_id}
///
/// The grade with its ranges, lowest first.
pub async fn get_grade(State(app_state): State<AppState>, Path(grade_id): Path<String>) -> ApiResult {
    let grade = grade_service::get_grade(app_state.db(), &grade_id).await?;
    Ok(ok(grade, "Grade retrieved successfully"))
}
