use axum::extract::{Query, State};
use serde::Serialize;
use services::archive_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};
use crate::routes::common::UserQuestionQuery;

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub deleted: u64,
}

/// DELETE /api/archive-student-responses?user_id=&question_id=
///
/// `404` when the learner has no archive for the question.
pub async fn purge_archive(State(app_state): State<AppState>, Query(query): Query<UserQuestionQuery>) -> ApiResult {
    let deleted = archive_service::purge(app_state.db(), &query.user_id, &query.question_id).await?;
    Ok(ok(PurgeResponse { deleted }, "Archived responses deleted successfully"))
}
