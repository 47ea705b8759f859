//! # Users Routes Module
//!
//! Admin-only user management, nested under `/users` behind `allow_admin`.

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_user;
use get::{get_user, list_users, list_users_by_role};
use post::{bulk_create_users, create_user};
use put::{assign_courses, update_user};

/// Builds the `/users` route group.
///
/// - `GET /users` → `list_users` (grouped by role)
/// - `POST /users` → `create_user`
/// - `POST /users/bulk` → `bulk_create_users`
/// - `GET /users/role/{role}` → `list_users_by_role`
/// - `GET /users/{user_id}` → `get_user`
/// - `PUT /users/{user_id}` → `update_user`
/// - `PUT /users/{user_id}/courses` → `assign_courses`
/// - `DELETE /users/{user_id}` → `delete_user`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/bulk", post(bulk_create_users))
        .route("/role/{role}", get(list_users_by_role))
        .route("/{user_id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{user_id}/courses", put(assign_courses))
}
