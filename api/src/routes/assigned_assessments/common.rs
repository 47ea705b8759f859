use db::models::assigned_assessment;
use sea_orm::DatabaseConnection;
use services::assignment_service;

use crate::auth::AuthUser;
use crate::response::ApiError;

/// Loads an assignment the caller may act on: their own, or any when staff.
pub async fn owned_assignment(
    db: &DatabaseConnection,
    user: &AuthUser,
    assignment_id: &str,
) -> Result<assigned_assessment::Model, ApiError> {
    let assignment = assignment_service::find(db, assignment_id).await?;
    if assignment.user_id != user.id() && !user.is_staff() {
        return Err(ApiError::forbidden("This assessment is not assigned to you"));
    }
    Ok(assignment)
}
