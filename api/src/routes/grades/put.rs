use axum::{
    Json,
    extract::{Path, State},
};
use services::grade_service::{self, GradeInput};
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// PUT /api/grades/{grade_id}
pub async fn update_grade(
    State(app_state): State<AppState>,
    Path(grade_id): Path<String>,
    Json(req): Json<GradeInput>,
) -> ApiResult {
    let grade = grade_service::update_grade(app_state.db(), &grade_id, req).await?;
    Ok(ok(grade, "Grade updated successfully"))
}
