#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, json_request, make_test_app, seed_user, token_for};
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use tower::ServiceExt;

    #[tokio::test]
    async fn malformed_path_ids_are_rejected_before_the_handler() {
        let (app, state) = make_test_app().await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;

        let response = app
            .oneshot(json_request(Method::GET, "/api/courses/not-an-id", Some(&token_for(&admin)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Invalid course_id.");
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (app, _) = make_test_app().await;
        for uri in ["/api/users", "/api/courses", "/api/assessor/overview", "/api/courseware/courses"] {
            let response = app
                .clone()
                .oneshot(json_request(Method::GET, uri, None, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn role_guards_return_forbidden() {
        let (app, state) = make_test_app().await;
        let learner = seed_user(&state, "learner@test.com", Role::Learner, &[]).await;
        let assessor = seed_user(&state, "assessor@test.com", Role::Assessor, &[]).await;

        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/users", Some(&token_for(&assessor)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/student-answers", Some(&token_for(&learner)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Staff access required");

        let response = app
            .oneshot(json_request(Method::GET, "/api/student-answers", Some(&token_for(&assessor)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn learners_cannot_read_other_learners_records() {
        let (app, state) = make_test_app().await;
        let me = seed_user(&state, "me@test.com", Role::Learner, &[]).await;
        let other = seed_user(&state, "other@test.com", Role::Learner, &[]).await;

        let uri = format!(
            "/api/assigned-assessments/user-course?user_id={}&course_id={}",
            other.id,
            util::object_id::new_id()
        );
        let response = app
            .oneshot(json_request(Method::GET, &uri, Some(&token_for(&me)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
