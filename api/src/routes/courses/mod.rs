//! # Courses Routes Module
//!
//! - `get.rs`: listing and lookup (authenticated)
//! - `post.rs`, `put.rs`, `delete.rs`: course management (admin)

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/courses` route group.
///
/// - `GET /courses` → `get::list_courses`
/// - `GET /courses/{course_id}` → `get::get_course`
/// - `GET /courses/user/{user_id}` → `get::courses_for_user`
/// - `POST /courses` → `post::create_course` (admin)
/// - `PUT /courses/{course_id}` → `put::update_course` (admin)
/// - `DELETE /courses/{course_id}` → `delete::delete_course` (admin)
pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_courses).route_layer(from_fn(allow_authenticated)))
        .route("/", post(post::create_course).route_layer(from_fn(allow_admin)))
        .route("/user/{user_id}", get(get::courses_for_user).route_layer(from_fn(allow_authenticated)))
        .route("/{course_id}", get(get::get_course).route_layer(from_fn(allow_authenticated)))
        .route("/{course_id}", put(put::update_course).route_layer(from_fn(allow_admin)))
        .route("/{course_id}", delete(delete::delete_course).route_layer(from_fn(allow_admin)))
}
