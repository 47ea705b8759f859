use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, RawPathParams},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use util::object_id;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardRejection = (StatusCode, Json<ApiResponse<Empty>>);

/// Extracts the user from the request and inserts it back for handlers.
async fn extract_and_insert_authuser(req: Request<Body>) -> Result<(Request<Body>, AuthUser), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard: `admin` and `super_admin`.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.role().is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Staff guard: admins and assessors.
pub async fn allow_staff(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_staff() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Staff access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Rejects any path parameter named `*_id` that is not a well-formed object id.
///
/// Runs before guards and handlers, so malformed ids never reach the database.
pub async fn validate_object_ids(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (mut parts, body) = req.into_parts();

    if let Ok(params) = RawPathParams::from_request_parts(&mut parts, &()).await {
        for (name, value) in &params {
            if name.ends_with("_id") && !object_id::is_valid(value) {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Invalid {name}."))),
                ));
            }
        }
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
