//! # Assessor Routes Module
//!
//! Reporting for staff, nested behind `allow_staff`.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

/// Builds the `/assessor` route group.
///
/// - `GET /overview?course_id=` → `get::overview`
/// - `GET /scores?assessment_id=` → `get::scores`
/// - `GET /responses?user_id=&assessment_id=` → `get::responses`
/// - `GET /ai-report?user_id=&question_id=` → `get::ai_report`
pub fn assessor_routes() -> Router<AppState> {
    Router::new()
        .route("/overview", get(get::overview))
        .route("/scores", get(get::scores))
        .route("/responses", get(get::responses))
        .route("/ai-report", get(get::ai_report))
}
