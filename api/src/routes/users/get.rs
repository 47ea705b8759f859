use axum::extract::{Path, State};
use services::user_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /api/users
///
/// Every user, grouped as `{ super_admins, admins, learners, assessors }`.
pub async fn list_users(State(app_state): State<AppState>) -> ApiResult {
    let grouped = user_service::list_grouped(app_state.db()).await?;
    Ok(ok(grouped, "Users retrieved successfully"))
}

/// GET /api/users/role/{role}
///
/// - `400` for an unknown role
/// - `404` when no user holds the role
pub async fn list_users_by_role(State(app_state): State<AppState>, Path(role): Path<String>) -> ApiResult {
    let users = user_service::list_by_role(app_state.db(), &role).await?;
    Ok(ok(users, "Users retrieved successfully"))
}

/// GET /api/users/{user_id}
pub async fn get_user(State(app_state): State<AppState>, Path(user_id): Path<String>) -> ApiResult {
    let user = user_service::get_user(app_state.db(), &user_id).await?;
    Ok(ok(user, "User retrieved successfully"))
}
