#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, json_request, make_test_app, seed_user, token_for};
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn course_body(code: &str) -> Value {
        json!({
            "name": "Business Management",
            "code": code,
            "visibility": "public",
            "start_date": "2026-01-15T00:00:00Z",
            "end_date": "2026-06-30T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn duplicate_course_codes_are_rejected() {
        let (app, state) = make_test_app().await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;
        let token = token_for(&admin);

        let first = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/courses", Some(&token), Some(course_body("BUS101"))))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let json = get_json_body(first).await;
        assert_eq!(json["data"]["code"], "BUS101");
        assert_eq!(json["data"]["total_enrollment"], 0);

        let second = app
            .oneshot(json_request(Method::POST, "/api/courses", Some(&token), Some(course_body("BUS101"))))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(second).await;
        assert_eq!(json["message"], "Course code already exists.");
    }

    #[tokio::test]
    async fn start_date_after_end_date_is_rejected() {
        let (app, state) = make_test_app().await;
        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;
        let mut body = course_body("BUS102");
        body["start_date"] = json!("2026-07-01");

        let response = app
            .oneshot(json_request(Method::POST, "/api/courses", Some(&token_for(&admin)), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn learners_read_but_do_not_write() {
        let (app, state) = make_test_app().await;
        let learner = seed_user(&state, "learner@test.com", Role::Learner, &[]).await;
        let token = token_for(&learner);

        let list = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/courses", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(list.status(), StatusCode::OK);

        let create = app
            .oneshot(json_request(Method::POST, "/api/courses", Some(&token), Some(course_body("BUS103"))))
            .await
            .unwrap();
        assert_eq!(create.status(), StatusCode::FORBIDDEN);
        let json = get_json_body(create).await;
        assert_eq!(json["message"], "Admin access required");
    }
}
