#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, json_request, make_test_app, seed_user, token_for};
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use sea_orm::EntityTrait;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let (app, state) = make_test_app().await;
        seed_user(&state, "admin@test.com", Role::Admin, &[]).await;

        let req = json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@test.com", "password": "password123"})),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"]["user"]["email"], "admin@test.com");
        assert_eq!(json["data"]["user"]["role"], "admin");
        assert!(json["data"]["user"].get("password_hash").is_none());

        let token = json["data"]["token"].as_str().unwrap().to_string();
        let verify = app
            .oneshot(json_request(Method::GET, "/api/auth/verify-token", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(verify.status(), StatusCode::OK);
        let json = get_json_body(verify).await;
        assert_eq!(json["data"]["email"], "admin@test.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (app, state) = make_test_app().await;
        seed_user(&state, "learner@test.com", Role::Learner, &[]).await;

        for body in [
            json!({"email": "learner@test.com", "password": "wrong-password"}),
            json!({"email": "nobody@test.com", "password": "password123"}),
        ] {
            let response = app
                .clone()
                .oneshot(json_request(Method::POST, "/api/auth/login", None, Some(body)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let json = get_json_body(response).await;
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "Invalid email or password.");
        }
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let (app, _) = make_test_app().await;
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "someone@test.com"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verify_token_rejects_missing_and_stale_tokens() {
        let (app, state) = make_test_app().await;
        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/auth/verify-token", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let user = seed_user(&state, "gone@test.com", Role::Learner, &[]).await;
        let token = token_for(&user);
        db::models::user::Entity::delete_by_id(user.id.clone())
            .exec(state.db())
            .await
            .unwrap();
        let response = app
            .oneshot(json_request(Method::GET, "/api/auth/verify-token", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
