use axum::extract::{Query, State};
use services::assessor_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};
use crate::routes::common::{AssessmentQuery, CourseQuery, UserAssessmentQuery, UserQuestionQuery};

/// GET /api/assessor/overview?course_id=
///
/// One entry per assessment of the course with `totalAssigned` and `totalCompleted`.
pub async fn overview(State(app_state): State<AppState>, Query(query): Query<CourseQuery>) -> ApiResult {
    let progress = assessor_service::overview(app_state.db(), &query.course_id).await?;
    Ok(ok(progress, "Assessment overview retrieved successfully"))
}

/// GET /api/assessor/scores?assessment_id=
///
/// Weighted totals and competency labels for every completed assignment.
///
/// ### Response
/// ```json
/// {
///   "assessment_id": "...",
///   "weights": { "first": 70, "second": 30 },
///   "students": [
///     { "user_id": "...", "name": "...", "email": "...", "question_count": 2,
///       "final_score": 148.0, "status": "competent", ... }
///   ]
/// }
/// ```
pub async fn scores(State(app_state): State<AppState>, Query(query): Query<AssessmentQuery>) -> ApiResult {
    let report = assessor_service::scores(app_state.db(), &query.assessment_id).await?;
    Ok(ok(report, "Scores retrieved successfully"))
}

/// GET /api/assessor/responses?user_id=&assessment_id=
///
/// Per-question answers with both model scores, the weighted contribution
/// and the label of the range that contribution falls in.
pub async fn responses(State(app_state): State<AppState>, Query(query): Query<UserAssessmentQuery>) -> ApiResult {
    let responses = assessor_service::responses(app_state.db(), &query.user_id, &query.assessment_id).await?;
    Ok(ok(responses, "Responses retrieved successfully"))
}

/// GET /api/assessor/ai-report?user_id=&question_id=
pub async fn ai_report(State(app_state): State<AppState>, Query(query): Query<UserQuestionQuery>) -> ApiResult {
    let report = assessor_service::ai_report(app_state.db(), &query.user_id, &query.question_id).await?;
    Ok(ok(report, "AI report retrieved successfully"))
}
