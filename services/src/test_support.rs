//! Seed data and AI stubs shared by the service tests.

use std::time::Duration;

use ai::{AiClient, RetryPolicy};
use chrono::{TimeZone, Utc};
use db::models::{
    TextList, ai_model, assessment, course, enrollment, file, grade,
    grade_range::{self, RangeLabel},
    question,
    user::{self, Role},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::{Value, json};
use util::object_id;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub struct Sources {
    pub course: course::Model,
    pub file: file::Model,
    pub grade: grade::Model,
    pub ai_model: ai_model::Model,
}

pub struct AssessmentFixture {
    pub course: course::Model,
    pub grade: grade::Model,
    pub ai_model: ai_model::Model,
    pub assessment: assessment::Model,
    pub questions: Vec<question::Model>,
}

pub async fn seed_course(db: &DatabaseConnection, code: &str) -> course::Model {
    let now = Utc::now();
    course::ActiveModel {
        id: Set(object_id::new_id()),
        name: Set(format!("Course {code}")),
        code: Set(code.to_owned()),
        description: Set(None),
        visibility: Set("public".into()),
        start_date: Set(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        end_date: Set(Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()),
        live_assessment_available: Set(false),
        grade_id: Set(None),
        total_marks: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

/// A learner bound to `codes`; the courses need not exist.
pub async fn seed_learner(db: &DatabaseConnection, email: &str, codes: &[&str]) -> user::Model {
    let learner = user::Model::create(db, "Learner", email, "password123", Role::Learner)
        .await
        .unwrap();
    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    enrollment::Model::add_codes(db, &learner.id, &codes).await.unwrap();
    learner
}

/// Grade with two ranges: 0–99.99 not competent, 100–200 competent.
pub async fn seed_grade(db: &DatabaseConnection) -> grade::Model {
    let g = grade::Model::create(db, "Competency scale").await.unwrap();
    grade_range::Model::create(db, &g.id, RangeLabel::NotCompetent, 0.0, 99.99)
        .await
        .unwrap();
    grade_range::Model::create(db, &g.id, RangeLabel::Competent, 100.0, 200.0)
        .await
        .unwrap();
    grade::Model::set_configured(db, &g.id, true).await.unwrap();
    grade::Model::find_by_id(db, &g.id).await.unwrap().unwrap()
}

/// Two-model ensemble weighted 70/30.
pub async fn seed_ai_model(db: &DatabaseConnection) -> ai_model::Model {
    let now = Utc::now();
    ai_model::ActiveModel {
        id: Set(object_id::new_id()),
        name: Set("Ensemble".into()),
        provider: Set("openai".into()),
        first_model: Set("first-model".into()),
        second_model: Set("second-model".into()),
        first_weight: Set(70),
        second_weight: Set(30),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_file(db: &DatabaseConnection, course_id: &str) -> file::Model {
    let now = Utc::now();
    file::ActiveModel {
        id: Set(object_id::new_id()),
        course_id: Set(course_id.to_owned()),
        title: Set("Case study".into()),
        file_name: Set("1700000000000_case.txt".into()),
        original_name: Set("case.txt".into()),
        content: Set("LuxeFashions case study. Answer every question.".into()),
        uploaded_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

/// Course, file, configured grade and AI model, ready for assessment generation.
pub async fn seed_sources(db: &DatabaseConnection) -> Sources {
    let course = seed_course(db, &unique_code()).await;
    let file = seed_file(db, &course.id).await;
    Sources {
        file,
        grade: seed_grade(db).await,
        ai_model: seed_ai_model(db).await,
        course,
    }
}

/// An assessment of `questions` questions, 60 minutes long, in a fresh course.
pub async fn seed_assessment_fixture(db: &DatabaseConnection, questions: usize) -> AssessmentFixture {
    let src = seed_sources(db).await;
    let now = Utc::now();
    let assessment = assessment::ActiveModel {
        id: Set(object_id::new_id()),
        course_id: Set(src.course.id.clone()),
        file_id: Set(Some(src.file.id.clone())),
        grade_id: Set(src.grade.id.clone()),
        ai_model_id: Set(src.ai_model.id.clone()),
        name: Set(format!("Assessment {}", src.course.code)),
        assessment_type: Set("Case study".into()),
        assessment_instruction: Set(TextList(vec!["Answer all questions".into()])),
        case_study_context: Set("LuxeFashions".into()),
        duration: Set("60 minutes".into()),
        duration_seconds: Set(3600),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap();

    let mut qs = Vec::with_capacity(questions);
    for i in 0..questions {
        let q = question::ActiveModel {
            id: Set(object_id::new_id()),
            assessment_id: Set(assessment.id.clone()),
            position: Set(i as i32),
            question_number: Set((i + 1).to_string()),
            question: Set(format!("Question {}", i + 1)),
            question_instruction: Set(String::new()),
            suggested_answer: Set(TextList(vec![format!("Answer {}", i + 1)])),
            comparison_instruction: Set(String::new()),
            comparison_count: Set(0),
            temperature: Set(0.0),
        }
        .insert(db)
        .await
        .unwrap();
        qs.push(q);
    }

    AssessmentFixture {
        course: src.course,
        grade: src.grade,
        ai_model: src.ai_model,
        assessment,
        questions: qs,
    }
}

fn unique_code() -> String {
    format!("C{}", object_id::new_id())
}

pub fn ai_client(server: &MockServer) -> AiClient {
    AiClient::new(server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_policies(
            RetryPolicy::new(2, Duration::from_millis(1)),
            RetryPolicy::new(2, Duration::from_millis(1)),
        )
}

/// Extraction stub returning `questions` questions and a 60 minute duration.
pub async fn mount_extraction(server: &MockServer, questions: usize) {
    let items: Vec<Value> = (1..=questions)
        .map(|i| {
            json!({
                "question_number": i.to_string(),
                "question": format!("Question {i}"),
                "question_instruction": "Be concise",
                "suggested_answer": [format!("Answer {i}")],
                "comparison_instruction": "",
                "comparison_count": 0
            })
        })
        .collect();
    Mock::given(method("POST"))
        .and(path("/extract/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assessment_type": "Case study",
            "case_study_context": "LuxeFashions",
            "assessment_instruction": ["Answer all questions"],
            "duration": "60 minutes",
            "questions_and_answers": items
        })))
        .mount(server)
        .await;
}

/// Evaluation stub for `model` scoring every item with `score`.
pub async fn mount_evaluation(server: &MockServer, model: &str, score: f64) {
    let feedback = format!("{model} feedback");
    Mock::given(method("POST"))
        .and(path(format!("/evaluate/{model}")))
        .respond_with(move |req: &Request| {
            let count = serde_json::from_slice::<Vec<Value>>(&req.body)
                .map(|items| items.len())
                .unwrap_or(0);
            let results: Vec<Value> = (0..count)
                .map(|_| json!({"score": score, "feedback": feedback}))
                .collect();
            ResponseTemplate::new(200).set_body_json(json!({ "results": results }))
        })
        .mount(server)
        .await;
}
