//! # Files Routes Module
//!
//! Course documents that assessments are generated from. Uploads are
//! `multipart/form-data`; responses carry metadata only, never the extracted text.

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/files` route group.
///
/// - `POST /files` → `post::upload_file` (admin)
/// - `GET /files/course/{course_id}` → `get::files_for_course`
/// - `PUT /files/{file_id}` → `put::replace_file` (admin)
/// - `DELETE /files/{file_id}` → `delete::delete_file` (admin)
pub fn files_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::upload_file).route_layer(from_fn(allow_admin)))
        .route("/course/{course_id}", get(get::files_for_course).route_layer(from_fn(allow_authenticated)))
        .route("/{file_id}", put(put::replace_file).route_layer(from_fn(allow_admin)))
        .route("/{file_id}", delete(delete::delete_file).route_layer(from_fn(allow_admin)))
}
