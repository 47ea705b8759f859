//! # Grade Ranges Routes Module
//!
//! Score bands attached to a grade.

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

/// Builds the `/grade-ranges` route group.
///
/// - `GET /grade-ranges/grade/{grade_id}` → `get::ranges_for_grade`
/// - `POST /grade-ranges` → `post::create_range` (admin)
/// - `PUT /grade-ranges/{range_id}` → `put::update_range` (admin)
/// - `DELETE /grade-ranges/{range_id}` → `delete::delete_range` (admin)
pub fn grade_ranges_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::create_range).route_layer(from_fn(allow_admin)))
        .route("/grade/{grade_id}", get(get::ranges_for_grade).route_layer(from_fn(allow_authenticated)))
        .route("/{range_id}", put(put::update_range).route_layer(from_fn(allow_admin)))
        .route("/{range_id}", delete(delete::delete_range).route_layer(from_fn(allow_admin)))
}
