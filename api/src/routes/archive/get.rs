use axum::extract::{Query, State};
use services::archive_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};
use crate::routes::common::{AssessmentQuery, UserQuestionQuery};

/// GET /api/archive-student-responses?assessment_id=
///
/// Archived answers to every question of the assessment, newest first.
pub async fn archive_for_assessment(
    State(app_state): State<AppState>,
    Query(query): Query<AssessmentQuery>,
) -> ApiResult {
    let archived = archive_service::for_assessment(app_state.db(), &query.assessment_id).await?;
    Ok(ok(archived, "Archived responses retrieved successfully"))
}

/// GET /api/archive-student-responses/by-user?user_id=&question_id=
pub async fn archive_for_user(State(app_state): State<AppState>, Query(query): Query<UserQuestionQuery>) -> ApiResult {
    let archived = archive_service::for_user_and_question(app_state.db(), &query.user_id, &query.question_id).await?;
    Ok(ok(archived, "Archived responses retrieved successfully"))
}
