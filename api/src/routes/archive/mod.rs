//! # Archived Student Responses Routes Module
//!
//! Answers moved aside when an assessment is reassigned. Nested behind `allow_staff`.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod delete;
pub mod get;

/// Builds the `/archive-student-responses` route group.
///
/// - `GET /?assessment_id=` → `get::archive_for_assessment`
/// - `GET /by-user?user_id=&question_id=` → `get::archive_for_user`
/// - `DELETE /?user_id=&question_id=` → `delete::purge_archive`
pub fn archive_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::archive_for_assessment).delete(delete::purge_archive))
        .route("/by-user", get(get::archive_for_user))
}
