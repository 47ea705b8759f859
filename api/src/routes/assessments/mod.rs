//! # Assessments Routes Module
//!
//! Assessments are generated from an uploaded course file by the AI
//! extraction service, then assigned to learners.
//!
//! - `post.rs`: generation (admin)
//! - `get.rs`: listing, staff question view, learner paper
//! - `put.rs`: per-question temperature (admin)
//! - `delete.rs`: removal of unassigned assessments (admin)

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated, allow_staff};

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/assessments` route group.
///
/// - `POST /assessments` → `post::create_assessment` (admin)
/// - `GET /assessments/course/{course_id}` → `get::assessments_for_course`
/// - `GET /assessments/{assessment_id}` → `get::get_assessment`
/// - `GET /assessments/{assessment_id}/questions` → `get::get_questions` (staff)
/// - `GET /assessments/{assessment_id}/paper` → `get::get_paper`
/// - `PUT /assessments/questions/{question_id}/temperature` → `put::set_temperature` (admin)
/// - `DELETE /assessments/{assessment_id}` → `delete::delete_assessment` (admin)
pub fn assessments_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::create_assessment).route_layer(from_fn(allow_admin)))
        .route(
            "/course/{course_id}",
            get(get::assessments_for_course).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/questions/{question_id}/temperature",
            put(put::set_temperature).route_layer(from_fn(allow_admin)),
        )
        .route("/{assessment_id}", get(get::get_assessment).route_layer(from_fn(allow_authenticated)))
        .route("/{assessment_id}", delete(delete::delete_assessment).route_layer(from_fn(allow_admin)))
        .route("/{assessment_id}/questions", get(get::get_questions).route_layer(from_fn(allow_staff)))
        .route("/{assessment_id}/paper", get(get::get_paper).route_layer(from_fn(allow_authenticated)))
}
