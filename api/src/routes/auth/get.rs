use axum::extract::State;
use services::auth_service;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResult, ok};

/// GET /api/auth/verify-token
///
/// Returns the user the bearer token belongs to, or 401 when the account
/// no longer exists.
pub async fn verify_token(State(app_state): State<AppState>, user: AuthUser) -> ApiResult {
    let current = auth_service::current_user(app_state.db(), user.id()).await?;
    Ok(ok(current, "Token is valid"))
}
