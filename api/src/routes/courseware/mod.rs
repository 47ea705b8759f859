//! # Courseware Routes Module
//!
//! The caller's own view: their courses and the assessments assigned to them.

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod get;

/// Builds the `/courseware` route group.
///
/// - `GET /courseware/courses` → `get::my_courses`
/// - `GET /courseware/courses/{course_id}/assessments` → `get::my_assessments`
pub fn courseware_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(get::my_courses))
        .route("/courses/{course_id}/assessments", get(get::my_assessments))
        .route_layer(from_fn(allow_authenticated))
}
