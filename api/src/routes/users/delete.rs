use axum::extract::{Path, State};
use services::user_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/users/{user_id}
///
/// - `400` for the super admin and for users with assignments
/// - `404` when the user does not exist
pub async fn delete_user(State(app_state): State<AppState>, Path(user_id): Path<String>) -> ApiResult {
    user_service::delete_user(app_state.db(), &user_id).await?;
    Ok(ok((), "User deleted successfully"))
}
