#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        get_json_body, json_request, make_test_app_with_ai, multipart_request, seed_user, token_for,
    };
    use axum::{
        Router,
        http::{Method, StatusCode},
    };
    use db::models::user::Role;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;
    use util::test_helpers::setup_test_storage_root;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    async fn mount_ai(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/extract/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "assessment_type": "Case study",
                "case_study_context": "LuxeFashions wants to grow online.",
                "assessment_instruction": ["Answer all questions"],
                "duration": "45 minutes",
                "questions_and_answers": [
                    {"question_number": "1", "question": "Set a goal", "suggested_answer": ["SMART goal"]},
                    {"question_number": "2", "question": "Pick a channel", "suggested_answer": ["Social media"]}
                ]
            })))
            .mount(server)
            .await;

        for (model, score) in [("first-model", 80.0), ("second-model", 60.0)] {
            Mock::given(method("POST"))
                .and(path(format!("/evaluate/{model}")))
                .respond_with(move |req: &Request| {
                    let count = serde_json::from_slice::<Vec<Value>>(&req.body)
                        .map(|items| items.len())
                        .unwrap_or(0);
                    let results: Vec<Value> = (0..count)
                        .map(|_| json!({"score": score, "feedback": "fine"}))
                        .collect();
                    ResponseTemplate::new(200).set_body_json(json!({ "results": results }))
                })
                .mount(server)
                .await;
        }
    }

    async fn call(app: &Router, method: Method, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(json_request(method, uri, Some(token), body))
            .await
            .unwrap();
        let status = response.status();
        (status, get_json_body(response).await)
    }

    #[tokio::test]
    #[serial]
    async fn generate_assign_answer_submit_and_score() {
        let _tmp = setup_test_storage_root();
        let server = MockServer::start().await;
        mount_ai(&server).await;
        let (app, state) = make_test_app_with_ai(&server).await;

        let admin = seed_user(&state, "admin@test.com", Role::Admin, &[]).await;
        let assessor = seed_user(&state, "assessor@test.com", Role::Assessor, &[]).await;
        let learner = seed_user(&state, "learner@test.com", Role::Learner, &[]).await;
        let admin_token = token_for(&admin);
        let learner_token = token_for(&learner);

        let (status, course) = call(
            &app,
            Method::POST,
            "/api/courses",
            &admin_token,
            Some(json!({
                "name": "Business Management",
                "code": "BUS101",
                "visibility": "public",
                "start_date": "2026-01-01",
                "end_date": "2026-12-31"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let course_id = course["data"]["id"].as_str().unwrap().to_string();

        let (status, grade) = call(&app, Method::POST, "/api/grades", &admin_token, Some(json!({"name": "Scale"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(grade["data"]["configured"], false);
        let grade_id = grade["data"]["id"].as_str().unwrap().to_string();
        for (label, start, end) in [("not-competent", 0.0, 99.99), ("competent", 100.0, 200.0)] {
            let (status, _) = call(
                &app,
                Method::POST,
                "/api/grade-ranges",
                &admin_token,
                Some(json!({"grade_id": grade_id, "label": label, "start_range": start, "end_range": end})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, model) = call(
            &app,
            Method::POST,
            "/api/ai-models",
            &admin_token,
            Some(json!({
                "name": "Ensemble",
                "provider": "openai",
                "first_model": "first-model",
                "second_model": "second-model",
                "first_weight": 70,
                "second_weight": 30
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let model_id = model["data"]["id"].as_str().unwrap().to_string();

        let upload = app
            .clone()
            .oneshot(multipart_request(
                Method::POST,
                "/api/files",
                &admin_token,
                &[("course_id", course_id.as_str()), ("title", "Case study")],
                Some(("case.txt", &b"LuxeFashions wants to grow online."[..])),
            ))
            .await
            .unwrap();
        assert_eq!(upload.status(), StatusCode::CREATED);
        let file = get_json_body(upload).await;
        assert!(file["data"].get("content").is_none());
        let file_id = file["data"]["id"].as_str().unwrap().to_string();

        let (status, generated) = call(
            &app,
            Method::POST,
            "/api/assessments",
            &admin_token,
            Some(json!({
                "course_id": course_id,
                "assessment_name": "Growth plan",
                "file_id": file_id,
                "grade_id": grade_id,
                "ai_model_id": model_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(generated["data"]["duration_seconds"], 2700);
        let assessment_id = generated["data"]["id"].as_str().unwrap().to_string();
        let question_ids: Vec<String> = generated["data"]["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(question_ids.len(), 2);

        let (status, assigned) = call(
            &app,
            Method::POST,
            &format!("/api/assigned-assessments/assign?assessment_id={assessment_id}"),
            &admin_token,
            Some(json!({"learners": [learner.id]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let assignment_id = assigned["data"]["assigned"][0]["id"].as_str().unwrap().to_string();

        let (status, paper) = call(
            &app,
            Method::GET,
            &format!("/api/assessments/{assessment_id}/paper"),
            &learner_token,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(paper["data"]["questions"][0].get("suggested_answer").is_none());
        assert_eq!(paper["data"]["assignment"]["status"], "pending");

        let (status, started) = call(
            &app,
            Method::PUT,
            &format!("/api/assigned-assessments/{assignment_id}/start"),
            &learner_token,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["data"]["status"], "in_progress");

        for question_id in &question_ids {
            let (status, _) = call(
                &app,
                Method::POST,
                "/api/student-answers",
                &learner_token,
                Some(json!({"question_id": question_id, "student_answer": "A measurable sales goal"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/api/assigned-assessments/{assignment_id}"),
            &learner_token,
            Some(json!({"status": "resubmission"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, submitted) = call(
            &app,
            Method::PUT,
            &format!("/api/assigned-assessments/{assignment_id}"),
            &learner_token,
            Some(json!({"status": "completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["data"]["evaluated"], 2);
        assert_eq!(submitted["data"]["assignment"]["status"], "completed");

        let (status, again) = call(
            &app,
            Method::PUT,
            &format!("/api/assigned-assessments/{assignment_id}"),
            &learner_token,
            Some(json!({"status": "completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(again["message"], "Cannot change status from completed to completed.");

        let (status, report) = call(
            &app,
            Method::GET,
            &format!("/api/assessor/scores?assessment_id={assessment_id}"),
            &token_for(&assessor),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let student = &report["data"]["students"][0];
        assert_eq!(student["user_id"], learner.id.as_str());
        assert_eq!(student["final_score"], 148.0);
        assert_eq!(student["status"], "competent");

        let (status, mine) = call(&app, Method::GET, "/api/courseware/courses", &learner_token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["data"][0]["code"], "BUS101");

        let (status, regenerated) = call(
            &app,
            Method::POST,
            "/api/assessments",
            &admin_token,
            Some(json!({
                "course_id": course_id,
                "assessment_name": "Growth plan v2",
                "file_id": file_id,
                "grade_id": grade_id,
                "ai_model_id": model_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(regenerated["message"], "Assessment has assignments and cannot be regenerated.");

        let (status, kept) = call(
            &app,
            Method::GET,
            &format!("/api/assessments/{assessment_id}/questions"),
            &admin_token,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let kept_ids: Vec<String> = kept["data"]["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kept_ids, question_ids);

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/api/assessments/{assessment_id}"),
            &admin_token,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
