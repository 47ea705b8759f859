#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, json_request, make_test_app, seed_user, token_for};
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use serde_json::json;
    use services::course_service::{self, CourseInput};
    use tower::ServiceExt;
    use util::state::AppState;

    async fn seed_course(state: &AppState, code: &str) {
        course_service::create_course(
            state.db(),
            CourseInput {
                name: Some(format!("Course {code}")),
                code: Some(code.into()),
                visibility: Some("public".into()),
                start_date: Some("2026-01-01".into()),
                end_date: Some("2026-12-31".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn admin_creates_a_learner() {
        let (app, state) = make_test_app().await;
        seed_course(&state, "BUS101").await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/users",
                Some(&token_for(&admin)),
                Some(json!({
                    "name": "Thandi",
                    "email": "thandi@test.com",
                    "password": "secret123",
                    "role": "learner",
                    "course_codes": ["BUS101"]
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["email"], "thandi@test.com");
        assert_eq!(json["data"]["course_codes"], json!(["BUS101"]));
    }

    #[tokio::test]
    async fn bulk_create_reports_each_failure() {
        let (app, state) = make_test_app().await;
        seed_course(&state, "BUS101").await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;
        seed_user(&state, "taken@test.com", Role::Learner, &[]).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/users/bulk",
                Some(&token_for(&admin)),
                Some(json!({"users": [
                    {"name": "Ok", "email": "ok@test.com", "password": "secret123", "role": "learner", "course_codes": ["BUS101"]},
                    {"name": "Dup", "email": "taken@test.com", "password": "secret123", "role": "learner", "course_codes": ["BUS101"]},
                    {"name": "Short", "email": "short@test.com", "password": "abc", "role": "learner", "course_codes": ["BUS101"]},
                    {"name": "NoCourse", "email": "nocourse@test.com", "password": "secret123", "role": "assessor"}
                ]})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["success_count"], 1);
        assert_eq!(json["data"]["failed_count"], 3);
        assert_eq!(json["data"]["failed_users"][0]["user"]["email"], "taken@test.com");
        assert_eq!(json["data"]["failed_users"][0]["error"], "Email already exists.");
    }

    #[tokio::test]
    async fn bulk_create_with_no_successes_is_a_bad_request() {
        let (app, state) = make_test_app().await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/users/bulk",
                Some(&token_for(&admin)),
                Some(json!({"users": [
                    {"name": "Bad", "email": "no-at-sign", "password": "secret123", "role": "admin"}
                ]})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["failed_count"], 1);
    }

    #[tokio::test]
    async fn users_are_grouped_by_role() {
        let (app, state) = make_test_app().await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;
        seed_user(&state, "l1@test.com", Role::Learner, &[]).await;
        seed_user(&state, "l2@test.com", Role::Learner, &[]).await;

        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/users", Some(&token_for(&admin)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["learners"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["admins"].as_array().unwrap().len(), 1);
        assert!(json["data"]["assessors"].as_array().unwrap().is_empty());

        let response = app
            .oneshot(json_request(
                Method::GET,
                "/api/users/role/assessor",
                Some(&token_for(&admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn super_admin_cannot_be_deleted() {
        let (app, state) = make_test_app().await;
        let root = seed_user(&state, "root@test.com", Role::SuperAdmin, &[]).await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::DELETE,
                &format!("/api/users/{}", root.id),
                Some(&token_for(&admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let learner = seed_user(&state, "learner@test.com", Role::Learner, &[]).await;
        let response = app
            .oneshot(json_request(
                Method::DELETE,
                &format!("/api/users/{}", learner.id),
                Some(&token_for(&admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "User deleted successfully");
        assert_eq!(json["data"], serde_json::Value::Null);
    }
}
