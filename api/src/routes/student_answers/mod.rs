//! # Student Answers Routes Module
//!
//! Learners save answers while an assessment is open; staff review and annotate them.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_staff};

pub mod get;
pub mod post;
pub mod put;

/// Builds the `/student-answers` route group.
///
/// - `POST /student-answers` → `post::submit_answer`
/// - `GET /student-answers` → `get::list_answers` (staff)
/// - `GET /student-answers/by-question?user_id=&question_id=` → `get::answer_by_question`
/// - `GET /student-answers/{answer_id}` → `get::get_answer`
/// - `PUT /student-answers/{answer_id}` → `put::update_answer` (staff)
pub fn student_answers_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::submit_answer).route_layer(from_fn(allow_authenticated)))
        .route("/", get(get::list_answers).route_layer(from_fn(allow_staff)))
        .route("/by-question", get(get::answer_by_question).route_layer(from_fn(allow_authenticated)))
        .route("/{answer_id}", get(get::get_answer).route_layer(from_fn(allow_authenticated)))
        .route("/{answer_id}", put(put::update_answer).route_layer(from_fn(allow_staff)))
}
