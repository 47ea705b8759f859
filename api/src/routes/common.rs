//! Query strings shared by several route groups.
//!
//! Every field defaults to empty so that a missing parameter is reported by the
//! identifier check ("Invalid user_id.") rather than by the query extractor.

use serde::Deserialize;

use crate::auth::AuthUser;
use crate::response::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserQuestionQuery {
    pub user_id: String,
    pub question_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserAssessmentQuery {
    pub user_id: String,
    pub assessment_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssessmentQuery {
    pub assessment_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CourseQuery {
    pub course_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OptionalUserQuery {
    pub user_id: Option<String>,
}

/// Resolves whose data a request is about.
///
/// Staff may name any user; everyone else is limited to themselves. An absent
/// or blank `requested` id means the caller.
pub fn subject_user(caller: &AuthUser, requested: Option<&str>) -> Result<String, ApiError> {
    match requested.map(str::trim).filter(|id| !id.is_empty()) {
        None => Ok(caller.id().to_owned()),
        Some(id) if id == caller.id() || caller.is_staff() => Ok(id.to_owned()),
        Some(_) => Err(ApiError::forbidden("You may only access your own records")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use db::models::user::Role;

    fn caller(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: "me".into(),
            role,
            exp: 0,
        })
    }

    #[test]
    fn learners_are_limited_to_themselves() {
        let learner = caller(Role::Learner);
        assert_eq!(subject_user(&learner, None).unwrap(), "me");
        assert_eq!(subject_user(&learner, Some(" ")).unwrap(), "me");
        assert_eq!(subject_user(&learner, Some("me")).unwrap(), "me");
        let err = subject_user(&learner, Some("other")).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn staff_may_name_anyone() {
        for role in [Role::Assessor, Role::Admin, Role::SuperAdmin] {
            assert_eq!(subject_user(&caller(role), Some("other")).unwrap(), "other");
        }
    }
}
