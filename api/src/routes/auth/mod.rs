//! # auth Routes Module
//!
//! - `post.rs`: `POST /auth/login`
//! - `get.rs`: `GET /auth/verify-token`

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use get::verify_token;
use post::login;

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → `login` (public)
/// - `GET /auth/verify-token` → `verify_token` (authenticated)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route(
            "/verify-token",
            get(verify_token).route_layer(from_fn(allow_authenticated)),
        )
}
