use db::models::user;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::user_service::{self, UserView};
use crate::validation::ensure_id;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Checks credentials. Unknown emails and wrong passwords get the same answer.
pub async fn authenticate(db: &DatabaseConnection, request: &LoginRequest) -> ServiceResult<user::Model> {
    let email = request.email.trim();
    if email.is_empty() || request.password.is_empty() {
        return Err(ServiceError::bad_request("Email and password are required."));
    }
    let found = user::Model::find_by_email(db, email).await?;
    match found {
        Some(u) if u.verify_password(&request.password) => {
            info!(user_id = %u.id, "login succeeded");
            Ok(u)
        }
        _ => {
            warn!(email, "login failed");
            Err(ServiceError::Unauthorized("Invalid email or password.".into()))
        }
    }
}

/// The user behind a verified token; 401 once the account is gone.
pub async fn current_user(db: &DatabaseConnection, user_id: &str) -> ServiceResult<UserView> {
    ensure_id(user_id, "user_id")
        .map_err(|_| ServiceError::Unauthorized("Invalid token.".into()))?;
    match user::Model::find_by_id(db, user_id).await? {
        Some(u) => user_service::view(db, u).await,
        None => Err(ServiceError::Unauthorized("User no longer exists.".into())),
    }
}
