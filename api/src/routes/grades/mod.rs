//! # Grades Routes Module
//!
//! A grade is a named set of score ranges. Reads are open to any
//! authenticated user; changes need an admin.

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

/// Builds the `/grades` route group.
///
/// - `GET /grades` → `get::list_grades`
/// - `GET /grades/configured` → `get::list_configured_grades`
/// - `GET /grades/{grade_id}` → `get::get_grade`
/// - `POST /grades` → `post::create_grade` (admin)
/// - `PUT /grades/{grade_id}` → `put::update_grade` (admin)
/// - `DELETE /grades/{grade_id}` → `delete::delete_grade` (admin)
pub fn grades_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_grades).route_layer(from_fn(allow_authenticated)))
        .route("/", post(post::create_grade).route_layer(from_fn(allow_admin)))
        .route("/configured", get(get::list_configured_grades).route_layer(from_fn(allow_authenticated)))
        .route("/{grade_id}", get(get::get_grade).route_layer(from_fn(allow_authenticated)))
        .route("/{grade_id}", put(put::update_grade).route_layer(from_fn(allow_admin)))
        .route("/{grade_id}", delete(delete::delete_grade).route_layer(from_fn(allow_admin)))
}
