//! The caller's own view of courses and assessments.

use db::models::user::Role;
use sea_orm::DatabaseConnection;

use crate::assignment_service::{self, AssignmentSummary};
use crate::course_service::{self, CourseView};
use crate::error::ServiceResult;

/// Every course for admins; the caller's bound courses otherwise.
pub async fn courses(db: &DatabaseConnection, user_id: &str, role: Role) -> ServiceResult<Vec<CourseView>> {
    if role.is_admin() {
        course_service::list_courses(db).await
    } else {
        course_service::courses_for_user(db, user_id).await
    }
}

/// The caller's assignments within one course.
pub async fn assessments(db: &DatabaseConnection, user_id: &str, course_id: &str) -> ServiceResult<Vec<AssignmentSummary>> {
    course_service::find(db, course_id).await?;
    assignment_service::for_user_course(db, user_id, course_id).await
}
