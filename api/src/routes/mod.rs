//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by resource, each protected by the guard its
//! operations need:
//! - `/health` → health check (public)
//! - `/auth` → login (public) and token verification
//! - `/users` → user management (admin)
//! - `/courses`, `/grades`, `/grade-ranges`, `/ai-models`, `/files`, `/assessments`
//!   → reads for any authenticated user, writes for admins
//! - `/assigned-assessments`, `/student-answers` → assignment workflow
//! - `/archive-student-responses`, `/assessor` → staff reporting
//! - `/courseware` → the caller's own courses and assessments

use crate::auth::guards::{allow_admin, allow_staff};
use crate::routes::{
    ai_models::ai_models_routes, archive::archive_routes, assessments::assessments_routes,
    assessor::assessor_routes, assigned_assessments::assigned_assessments_routes, auth::auth_routes,
    courses::courses_routes, courseware::courseware_routes, files::files_routes,
    grade_ranges::grade_ranges_routes, grades::grades_routes, health::health_routes,
    student_answers::student_answers_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod ai_models;
pub mod archive;
pub mod assessments;
pub mod assessor;
pub mod assigned_assessments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod courseware;
pub mod files;
pub mod grade_ranges;
pub mod grades;
pub mod health;
pub mod student_answers;
pub mod users;

/// Builds the application router for every `/api` endpoint.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest("/courses", courses_routes())
        .nest("/grades", grades_routes())
        .nest("/grade-ranges", grade_ranges_routes())
        .nest("/ai-models", ai_models_routes())
        .nest("/files", files_routes())
        .nest("/assessments", assessments_routes())
        .nest("/assigned-assessments", assigned_assessments_routes())
        .nest("/student-answers", student_answers_routes())
        .nest(
            "/archive-student-responses",
            archive_routes().route_layer(from_fn(allow_staff)),
        )
        .nest("/assessor", assessor_routes().route_layer(from_fn(allow_staff)))
        .nest("/courseware", courseware_routes())
        .with_state(app_state)
}
