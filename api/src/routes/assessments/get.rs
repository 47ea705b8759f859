use axum::extract::{Path, Query, State};
use services::assessment_service;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};
use crate::routes::common::{OptionalUserQuery, subject_user};

/// GET /api/assessments/course/{course_id}
pub async fn assessments_for_course(State(app_state): State<AppState>, Path(course_id): Path<String>) -> ApiResult {
    let assessments = assessment_service::assessments_for_course(app_state.db(), &course_id).await?;
    Ok(ok(assessments, "Assessments retrieved successfully"))
}

/// GET /api/assessments/{assessment_id}
pub async fn get_assessment(State(app_state): State<AppState>, Path(assessment_id): Path<String>) -> ApiResult {
    let assessment = assessment_service::get_assessment(app_state.db(), &assessment_id).await?;
    Ok(ok(assessment, "Assessment retrieved successfully"))
}

/// GET /api/assessments/{assessment_id}/questions
///
/// Full questions including suggested answers, in extraction order.
pub async fn get_questions(State(app_state): State<AppState>, Path(assessment_id): Path<String>) -> ApiResult {
    let detail = assessment_service::questions(app_state.db(), &assessment_id).await?;
    Ok(ok(detail, "Questions retrieved successfully"))
}

/// GET /api/assessments/{assessment_id}/paper?user_id=
///
/// The assessment as the learner sees it: questions without suggested
/// answers, the learner's assignment and any answers already saved.
/// `user_id` defaults to the caller; only staff may name someone else.
pub async fn get_paper(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(assessment_id): Path<String>,
    Query(query): Query<OptionalUserQuery>,
) -> ApiResult {
    let subject = subject_user(&user, query.user_id.as_deref())?;
    let paper = assessment_service::paper(app_state.db(), &assessment_id, &subject).await?;
    Ok(ok(paper, "Assessment paper retrieved successfully"))
}
