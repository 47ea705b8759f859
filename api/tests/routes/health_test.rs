#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, json_request, make_test_app};
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_is_public() {
        let (app, _) = make_test_app().await;
        let response = app
            .oneshot(json_request(Method::GET, "/api/health", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"], "OK");
    }
}
