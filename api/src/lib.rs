pub mod auth;
pub mod response;
pub mod routes;

use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::auth::guards::validate_object_ids;

/// The full `/api` application without transport-level layers.
///
/// `main` adds request logging and CORS on top; tests drive this directly.
pub fn app(app_state: AppState) -> Router {
    Router::new().nest("/api", routes::routes(app_state).layer(from_fn(validate_object_ids)))
}
