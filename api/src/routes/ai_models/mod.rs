//! # AI Models Routes Module
//!
//! An AI model record pairs two upstream models with weights summing to 100.

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

/// Builds the `/ai-models` route group.
///
/// - `GET /ai-models` → `get::list_models`
/// - `GET /ai-models/{model_id}` → `get::get_model`
/// - `POST /ai-models` → `post::create_model` (admin)
/// - `PUT /ai-models/{model_id}` → `put::update_model` (admin)
/// - `DELETE /ai-models/{model_id}` → `delete::delete_model` (admin)
pub fn ai_models_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_models).route_layer(from_fn(allow_authenticated)))
        .route("/", post(post::create_model).route_layer(from_fn(allow_admin)))
        .route("/{model_id}", get(get::get_model).route_layer(from_fn(allow_authenticated)))
        .route("/{model_id}", put(put::update_model).route_layer(from_fn(allow_admin)))
        .route("/{model_id}", delete(delete::delete_model).route_layer(from_fn(allow_admin)))
}
