//! Start-up seeding.

use db::models::user::{self, Role};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::ServiceResult;

/// Creates the "Super Admin" account unless `email` is blank or already taken.
///
/// Returns the created user, or `None` when nothing was done.
pub async fn ensure_super_admin(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> ServiceResult<Option<user::Model>> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        info!("no super admin configured, skipping bootstrap");
        return Ok(None);
    }
    if user::Model::find_by_email(db, email).await?.is_some() {
        return Ok(None);
    }
    let created = user::Model::create(db, "Super Admin", email, password, Role::SuperAdmin).await?;
    info!(user_id = %created.id, email, "super admin created");
    Ok(Some(created))
}
