use axum::{Json, extract::State};
use services::student_answer_service::{self, SubmitAnswer};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};
use crate::routes::common::subject_user;

/// POST /api/student-answers
///
/// ### Request Body
/// ```json
/// {
///   "user_id": "...",
///   "question_id": "...",
///   "student_answer": "Plain text answer",
///   "formatted_answer": "<p>Plain text answer</p>"
/// }
/// ```
///
/// `user_id` may be omitted by learners. Saving again replaces the earlier
/// answer to the same question.
///
/// ### Errors
/// - `400` for a blank answer or an assignment that is no longer open
/// - `404` when the question or the assignment does not exist
pub async fn submit_answer(
    State(app_state): State<AppState>,
    user: AuthUser,
    Json(mut req): Json<SubmitAnswer>,
) -> ApiResult {
    req.user_id = subject_user(&user, Some(req.user_id.as_str()))?;
    let answer = student_answer_service::submit(app_state.db(), req).await?;
    Ok(ok(answer, "Answer saved successfully"))
}
