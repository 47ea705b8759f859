use axum::{Json, extract::State};
use services::grade_service::{self, GradeInput};
use util::state::AppState;

use crate::response::{ApiResult, created};

/// POST /api/grades
///
/// `{ "name": "Pass mark" }`. New grades start unconfigured.
pub async fn create_grade(State(app_state): State<AppState>, Json(req): Json<GradeInput>) -> ApiResult {
    let grade = grade_service::create_grade(app_state.db(), req).await?;
    Ok(created(grade, "Grade created successfully"))
}
