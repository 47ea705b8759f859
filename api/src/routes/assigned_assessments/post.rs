use axum::{
    Json,
    extract::{Query, State},
};
use services::assignment_service::{self, AssignRequest, ReassignRequest};
use util::state::AppState;

use crate::response::{ApiResult, created, ok};
use crate::routes::common::AssessmentQuery;

/// POST /api/assigned-assessments/assign?assessment_id=
///
/// ### Request Body
/// ```json
/// { "learners": ["<user id>", "<user id>"] }
/// ```
///
/// Each learner is bound to the assessment's course and receives a `pending`
/// assignment with the full duration. Learners already holding the assessment
/// are listed in `already_assigned` and left untouched.
///
/// ### Errors
/// - `400` for an empty list or a user that is not a learner
/// - `404` for an unknown assessment or user
pub async fn assign(
    State(app_state): State<AppState>,
    Query(query): Query<AssessmentQuery>,
    Json(req): Json<AssignRequest>,
) -> ApiResult {
    let outcome = assignment_service::assign(app_state.db(), &query.assessment_id, req).await?;
    Ok(created(outcome, "Assessment assigned successfully"))
}

/// POST /api/assigned-assessments/reassign
///
/// `{ "user_id": "...", "assessment_id": "..." }`
///
/// Archives the learner's answers to this assessment, removes them and resets
/// the assignment to `pending` with the full duration.
pub async fn reassign(State(app_state): State<AppState>, Json(req): Json<ReassignRequest>) -> ApiResult {
    let outcome = assignment_service::reassign(app_state.db(), req).await?;
    Ok(ok(outcome, "Assessment reassigned successfully"))
}
