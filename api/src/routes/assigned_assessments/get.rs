use axum::extract::{Path, Query, State};
use serde::Deserialize;
use services::assignment_service;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};
use crate::routes::common::subject_user;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub assessment_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserCourseQuery {
    pub user_id: Option<String>,
    pub course_id: String,
}

/// GET /api/assigned-assessments?user_id=&assessment_id=
///
/// Both filters are optional. Learners always get their own assignments.
pub async fn list_assignments(
    State(app_state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult {
    let user_filter = if user.is_staff() {
        query.user_id.filter(|id| !id.trim().is_empty())
    } else {
        Some(subject_user(&user, query.user_id.as_deref())?)
    };
    let assessment_filter = query.assessment_id.filter(|id| !id.trim().is_empty());

    let assignments =
        assignment_service::list(app_state.db(), user_filter.as_deref(), assessment_filter.as_deref()).await?;
    Ok(ok(assignments, "Assigned assessments retrieved successfully"))
}

/// GET /api/assigned-assessments/assessment/{assessment_id}
///
/// Every assignment of the assessment with the assignee's name and email.
pub async fn assignees(State(app_state): State<AppState>, Path(assessment_id): Path<String>) -> ApiResult {
    let assignees = assignment_service::assignees(app_state.db(), &assessment_id).await?;
    Ok(ok(assignees, "Assignees retrieved successfully"))
}

/// GET /api/assigned-assessments/user-course?user_id=&course_id=
pub async fn for_user_course(
    State(app_state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserCourseQuery>,
) -> ApiResult {
    let subject = subject_user(&user, query.user_id.as_deref())?;
    let summaries = assignment_service::for_user_course(app_state.db(), &subject, &query.course_id).await?;
    Ok(ok(summaries, "Assigned assessments retrieved successfully"))
}
