use axum::extract::{Path, Query, State};
use serde::Deserialize;
use services::student_answer_service;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResult, ok};
use crate::routes::common::subject_user;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ByQuestionQuery {
    pub user_id: Option<String>,
    pub question_id: String,
}

/// GET /api/student-answers
pub async fn list_answers(State(app_state): State<AppState>) -> ApiResult {
    let answers = student_answer_service::list(app_state.db()).await?;
    Ok(ok(answers, "Student answers retrieved successfully"))
}

/// GET /api/student-answers/{answer_id}
///
/// Learners may only read their own answers.
pub async fn get_answer(State(app_state): State<AppState>, user: AuthUser, Path(answer_id): Path<String>) -> ApiResult {
    let answer = student_answer_service::find(app_state.db(), &answer_id).await?;
    if answer.user_id != user.id() && !user.is_staff() {
        return Err(ApiError::forbidden("You may only access your own records"));
    }
    Ok(ok(answer, "Student answer retrieved successfully"))
}

/// GET /api/student-answers/by-question?user_id=&question_id=
pub async fn answer_by_question(
    State(app_state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ByQuestionQuery>,
) -> ApiResult {
    let subject = subject_user(&user, query.user_id.as_deref())?;
    let answer = student_answer_service::by_user_and_question(app_state.db(), &subject, &query.question_id).await?;
    Ok(ok(answer, "Student answer retrieved successfully"))
}
