//! # Assigned Assessments Routes Module
//!
//! The lifecycle of one learner's copy of an assessment:
//! `pending` → `in_progress` → `completed` (evaluated) or `rejected` (timed out),
//! with `resubmission` as a way back in.

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated, allow_staff};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/assigned-assessments` route group.
///
/// - `POST /assign?assessment_id=` → `post::assign` (admin)
/// - `POST /reassign` → `post::reassign` (admin)
/// - `GET /` → `get::list_assignments` (learners see only their own)
/// - `GET /assessment/{assessment_id}` → `get::assignees` (staff)
/// - `GET /user-course?user_id=&course_id=` → `get::for_user_course`
/// - `PUT /{assignment_id}` → `put::update_status`
/// - `PUT /{assignment_id}/start` → `put::start`
/// - `DELETE /{assignment_id}` → `delete::delete_assignment` (admin)
pub fn assigned_assessments_routes() -> Router<AppState> {
    Router::new()
        .route("/assign", post(post::assign).route_layer(from_fn(allow_admin)))
        .route("/reassign", post(post::reassign).route_layer(from_fn(allow_admin)))
        .route("/", get(get::list_assignments).route_layer(from_fn(allow_authenticated)))
        .route("/assessment/{assessment_id}", get(get::assignees).route_layer(from_fn(allow_staff)))
        .route("/user-course", get(get::for_user_course).route_layer(from_fn(allow_authenticated)))
        .route("/{assignment_id}", put(put::update_status).route_layer(from_fn(allow_authenticated)))
        .route("/{assignment_id}", delete(delete::delete_assignment).route_layer(from_fn(allow_admin)))
        .route("/{assignment_id}/start", put(put::start).route_layer(from_fn(allow_authenticated)))
}
