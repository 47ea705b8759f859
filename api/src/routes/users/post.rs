//! # User Creation Routes
//!
//! - `POST /api/users`: Create a single user
//! - `POST /api/users/bulk`: Create many users, continuing past failures

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use services::user_service::{self, BulkOutcome, NewUser};
use util::state::AppState;

use crate::response::{ApiResponse, ApiResult, created};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BulkCreateUsersRequest {
    pub users: Vec<NewUser>,
}

/// POST /api/users
///
/// ### Request Body
/// ```json
/// {
///   "name": "Thandi",
///   "email": "thandi@example.com",
///   "password": "secret123",
///   "role": "learner",
///   "course_codes": ["BUS101"]
/// }
/// ```
///
/// ### Errors
/// - 400: validation failure, unknown course code or duplicate email
pub async fn create_user(State(app_state): State<AppState>, Json(req): Json<NewUser>) -> ApiResult {
    let user = user_service::create_user(app_state.db(), req).await?;
    Ok(created(user, "User created successfully"))
}

/// POST /api/users/bulk
///
/// Each entry is created independently; failures are collected in
/// `failed_users` and do not stop the batch.
///
/// - `201 Created` when at least one user was created
/// - `400 Bad Request` when none were, with the same body
pub async fn bulk_create_users(
    State(app_state): State<AppState>,
    Json(req): Json<BulkCreateUsersRequest>,
) -> ApiResult {
    let outcome = user_service::bulk_create(app_state.db(), req.users).await?;
    if outcome.success_count == 0 {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<BulkOutcome> {
                success: false,
                data: outcome,
                message: "No users were created".into(),
            }),
        )
            .into_response());
    }
    let message = format!(
        "{} users created, {} failed",
        outcome.success_count, outcome.failed_count
    );
    Ok(created(outcome, message))
}
