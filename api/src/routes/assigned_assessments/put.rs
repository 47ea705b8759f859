use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use db::models::assigned_assessment::AssignmentStatus;
use serde::Deserialize;
use services::assignment_service;
use util::state::AppState;

use super::common::owned_assignment;
use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResult, ok};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusRequest {
    pub status: String,
}

/// PUT /api/assigned-assessments/{assignment_id}
///
/// `{ "status": "completed" }`
///
/// Staff may set any status. Learners may only submit (`completed`) their own
/// assignment. Completing an assignment scores its answers with both
/// configured models before responding.
///
/// ### Responses
/// - `200 OK` with `{ assignment, evaluated }`
/// - `400` for an unknown status
/// - `403` when a learner sets another status or targets someone else's assignment
pub async fn update_status(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(assignment_id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> ApiResult {
    let db = app_state.db();
    owned_assignment(db, &user, &assignment_id).await?;
    let submitting = AssignmentStatus::from_str(req.status.trim()).ok() == Some(AssignmentStatus::Completed);
    if !user.is_staff() && !submitting {
        return Err(ApiError::forbidden("Learners may only submit their assessment"));
    }

    let outcome = assignment_service::update_status(db, app_state.ai(), &assignment_id, &req.status).await?;
    Ok(ok(outcome, "Assessment status updated successfully"))
}

/// PUT /api/assigned-assessments/{assignment_id}/start
///
/// Moves a `pending` or `resubmission` assignment to `in_progress`; from then
/// on the sweeper counts down its remaining time.
pub async fn start(State(app_state): State<AppState>, user: AuthUser, Path(assignment_id): Path<String>) -> ApiResult {
    let db = app_state.db();
    owned_assignment(db, &user, &assignment_id).await?;
    let assignment = assignment_service::start(db, &assignment_id).await?;
    Ok(ok(assignment, "Assessment started"))
}
