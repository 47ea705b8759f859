use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Origin, UserAgent};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::info;

use crate::auth::claims::AuthUser;

/// Who made a request, as written to the request log.
#[derive(Debug, PartialEq, Eq)]
struct Caller {
    user: String,
    role: String,
}

impl Caller {
    fn from_auth(user: Option<AuthUser>) -> Self {
        match user {
            Some(AuthUser(claims)) => Self {
                user: claims.sub,
                role: claims.role.to_string(),
            },
            None => Self {
                user: "anonymous".into(),
                role: "none".into(),
            },
        }
    }
}

/// Logs each request with the caller's id and role, then logs the response
/// status and latency once the handler has run. CORS preflight `OPTIONS`
/// requests pass through unlogged.
///
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::auth::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return Ok(next.run(req).await);
    }

    let caller = Caller::from_auth(AuthUser::from_request_parts(&mut parts, &()).await.ok());

    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(o)| o.to_string());

    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string());

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();
    info!(
        method = ?method,
        path = %path,
        ip = %addr.ip(),
        user = %caller.user,
        role = %caller.role,
        origin = origin.unwrap_or_else(|| "unknown".into()),
        user_agent = user_agent.unwrap_or_else(|| "unknown".into()),
        "Incoming request"
    );

    let started = Instant::now();
    let response = next.run(Request::from_parts(parts, body)).await;
    info!(
        method = ?method,
        path = %path,
        user = %caller.user,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request finished"
    );
    Ok(response)
}
