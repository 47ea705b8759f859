use axum::{
    Json,
    extract::{Path, State},
};
use services::student_answer_service::{self, AnswerUpdate};
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// PUT /api/student-answers/{answer_id}
///
/// Partial update of the answer text, `human_assess_remarks` or `is_marked`.
pub async fn update_answer(
    State(app_state): State<AppState>,
    Path(answer_id): Path<String>,
    Json(req): Json<AnswerUpdate>,
) -> ApiResult {
    let answer = student_answer_service::update(app_state.db(), &answer_id, req).await?;
    Ok(ok(answer, "Answer updated successfully"))
}
