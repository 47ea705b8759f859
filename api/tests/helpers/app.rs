use std::time::Duration;

use ai::{AiClient, RetryPolicy};
use api::auth::generate_jwt;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
    response::Response,
};
use db::{
    models::{
        enrollment,
        user::{self, Role},
    },
    test_utils::setup_test_db,
};
use serde_json::Value;
use util::state::AppState;
use wiremock::MockServer;

/// App wired to a fresh in-memory database and an AI client that points
/// nowhere. Use [`make_test_app_with_ai`] when a route calls the AI service.
pub async fn make_test_app() -> (Router, AppState) {
    let ai = AiClient::new("http://127.0.0.1:1", Duration::from_secs(2))
        .expect("ai client")
        .with_policies(RetryPolicy::none(), RetryPolicy::none());
    build(ai).await
}

pub async fn make_test_app_with_ai(server: &MockServer) -> (Router, AppState) {
    let ai = AiClient::new(server.uri(), Duration::from_secs(5))
        .expect("ai client")
        .with_policies(
            RetryPolicy::new(2, Duration::from_millis(1)),
            RetryPolicy::new(2, Duration::from_millis(1)),
        );
    build(ai).await
}

async fn build(ai: AiClient) -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db, ai);
    (api::app(app_state.clone()), app_state)
}

pub async fn seed_user(app_state: &AppState, email: &str, role: Role, codes: &[&str]) -> user::Model {
    let created = user::Model::create(app_state.db(), "Test User", email, "password123", role)
        .await
        .expect("seed user");
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    enrollment::Model::add_codes(app_state.db(), &created.id, &codes)
        .await
        .expect("seed enrollment");
    created
}

pub fn token_for(user: &user::Model) -> String {
    let (token, _) = generate_jwt(&user.id, user.role).expect("jwt");
    token
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub const BOUNDARY: &str = "----test-boundary";

/// A `multipart/form-data` request with text fields and one file part.
pub fn multipart_request(
    method: Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
