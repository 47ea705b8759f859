use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use services::{
    auth_service::{self, LoginRequest},
    user_service::{self, UserView},
};
use tracing::error;
use util::state::AppState;

use crate::auth::generate_jwt;
use crate::response::{ApiError, ApiResult, ok};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserView,
}

/// POST /api/auth/login
///
/// ### Request Body
/// ```json
/// { "email": "admin@example.com", "password": "secret123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ token, expires_at, user }`
/// - `400 Bad Request` when a field is missing
/// - `401 Unauthorized` for unknown emails and wrong passwords alike
pub async fn login(State(app_state): State<AppState>, Json(req): Json<LoginRequest>) -> ApiResult {
    let db = app_state.db();
    let user = auth_service::authenticate(db, &req).await?;
    let (token, expires_at) = generate_jwt(&user.id, user.role).map_err(|e| {
        error!(error = %e, "token encoding failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Could not issue token")
    })?;
    let user = user_service::view(db, user).await?;

    Ok(ok(
        LoginResponse {
            token,
            expires_at,
            user,
        },
        "Login successful",
    ))
}
