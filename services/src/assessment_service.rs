use chrono::Utc;
use db::models::{
    TextList, ai_model, assessment, assigned_assessment, course, file, grade, question, student_answer,
};
use ai::{AiClient, AiError, ExtractedAssessment};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use util::object_id;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{ensure_id, required};

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateAssessment {
    pub course_id: String,
    pub assessment_name: String,
    pub file_id: String,
    pub grade_id: String,
    pub ai_model_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentDetail {
    #[serde(flatten)]
    pub assessment: assessment::Model,
    pub questions: Vec<question::Model>,
}

/// A question as shown to a learner: no suggested answer or evaluator tuning.
#[derive(Debug, Clone, Serialize)]
pub struct PaperQuestion {
    pub id: String,
    pub question_number: String,
    pub question: String,
    pub question_instruction: String,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Paper {
    pub assessment_id: String,
    pub name: String,
    pub assessment_type: String,
    pub assessment_instruction: TextList,
    pub case_study_context: String,
    pub duration: String,
    pub assignment: assigned_assessment::Model,
    pub questions: Vec<PaperQuestion>,
}

/// Seconds for a duration text: the first integer, read as minutes.
///
/// `"90 minutes"` is 5400; text without digits is 0 (untimed).
pub fn parse_duration_seconds(duration: &str) -> i64 {
    FIRST_NUMBER
        .find(duration)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|minutes| minutes.saturating_mul(60))
        .unwrap_or(0)
}

pub async fn find(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<assessment::Model> {
    ensure_id(assessment_id, "assessment_id")?;
    assessment::Model::find_by_id(db, assessment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment not found."))
}

async fn replace_questions<C: ConnectionTrait>(
    db: &C,
    assessment_id: &str,
    extracted: &ExtractedAssessment,
) -> ServiceResult<Vec<question::Model>> {
    question::Model::delete_for_assessment(db, assessment_id).await?;
    let mut questions = Vec::with_capacity(extracted.questions_and_answers.len());
    for (position, q) in extracted.questions_and_answers.iter().enumerate() {
        let number = if q.question_number.trim().is_empty() {
            (position + 1).to_string()
        } else {
            q.question_number.trim().to_string()
        };
        let inserted = question::ActiveModel {
            id: Set(object_id::new_id()),
            assessment_id: Set(assessment_id.to_owned()),
            position: Set(position as i32),
            question_number: Set(number),
            question: Set(q.question.clone()),
            question_instruction: Set(q.question_instruction.clone()),
            suggested_answer: Set(TextList(q.suggested_answer.clone())),
            comparison_instruction: Set(q.comparison_instruction.clone()),
            comparison_count: Set(q.comparison_count),
            temperature: Set(0.0),
        }
        .insert(db)
        .await?;
        questions.push(inserted);
    }
    Ok(questions)
}

/// Generates an assessment from an uploaded file.
///
/// The file text is sent to the AI extraction endpoint. If an assessment
/// already exists for the same course and file it is updated in place and its
/// questions are replaced; otherwise a new one is created. An existing
/// assessment that has been assigned is never regenerated.
pub async fn create_from_file(
    db: &DatabaseConnection,
    ai: &AiClient,
    input: CreateAssessment,
) -> ServiceResult<AssessmentDetail> {
    ensure_id(&input.course_id, "course_id")?;
    ensure_id(&input.file_id, "file_id")?;
    ensure_id(&input.grade_id, "grade_id")?;
    ensure_id(&input.ai_model_id, "ai_model_id")?;
    let name = required(Some(&input.assessment_name), "Assessment name")?;

    if course::Model::find_by_id(db, &input.course_id).await?.is_none() {
        return Err(ServiceError::not_found("Course not found."));
    }
    let source = file::Model::find_by_id(db, &input.file_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("File not found."))?;
    if source.course_id != input.course_id {
        return Err(ServiceError::bad_request("File does not belong to this course."));
    }
    if grade::Model::find_by_id(db, &input.grade_id).await?.is_none() {
        return Err(ServiceError::not_found("Grade not found."));
    }
    if ai_model::Model::find_by_id(db, &input.ai_model_id).await?.is_none() {
        return Err(ServiceError::not_found("AI model not found."));
    }

    if let Some(current) = assessment::Model::find_by_course_and_file(db, &input.course_id, &input.file_id).await? {
        if assigned_assessment::Model::count_for_assessment(db, &current.id).await? > 0 {
            return Err(ServiceError::bad_request(
                "Assessment has assignments and cannot be regenerated.",
            ));
        }
    }

    let extracted = ai.extract(&source.content).await?;
    if !extracted.is_complete() {
        return Err(AiError::MalformedResponse("extraction returned an incomplete assessment".into()).into());
    }
    let duration_seconds = parse_duration_seconds(&extracted.duration);
    let now = Utc::now();

    let txn = db.begin().await?;
    let existing = assessment::Model::find_by_course_and_file(&txn, &input.course_id, &input.file_id).await?;
    let saved = match existing {
        Some(current) => {
            let mut active = current.into_active_model();
            active.grade_id = Set(input.grade_id.clone());
            active.ai_model_id = Set(input.ai_model_id.clone());
            active.name = Set(name);
            active.assessment_type = Set(extracted.assessment_type.clone());
            active.assessment_instruction = Set(TextList(extracted.assessment_instruction.clone()));
            active.case_study_context = Set(extracted.case_study_context.clone());
            active.duration = Set(extracted.duration.clone());
            active.duration_seconds = Set(duration_seconds);
            active.updated_at = Set(now);
            active.update(&txn).await?
        }
        None => {
            assessment::ActiveModel {
                id: Set(object_id::new_id()),
                course_id: Set(input.course_id.clone()),
                file_id: Set(Some(input.file_id.clone())),
                grade_id: Set(input.grade_id.clone()),
                ai_model_id: Set(input.ai_model_id.clone()),
                name: Set(name),
                assessment_type: Set(extracted.assessment_type.clone()),
                assessment_instruction: Set(TextList(extracted.assessment_instruction.clone())),
                case_study_context: Set(extracted.case_study_context.clone()),
                duration: Set(extracted.duration.clone()),
                duration_seconds: Set(duration_seconds),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?
        }
    };
    let questions = replace_questions(&txn, &saved.id, &extracted).await?;
    txn.commit().await?;

    info!(assessment_id = %saved.id, questions = questions.len(), "assessment generated");
    Ok(AssessmentDetail {
        assessment: saved,
        questions,
    })
}

pub async fn assessments_for_course(db: &DatabaseConnection, course_id: &str) -> ServiceResult<Vec<assessment::Model>> {
    ensure_id(course_id, "course_id")?;
    if course::Model::find_by_id(db, course_id).await?.is_none() {
        return Err(ServiceError::not_found("Course not found."));
    }
    Ok(assessment::Model::for_course(db, course_id).await?)
}

pub async fn get_assessment(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<assessment::Model> {
    find(db, assessment_id).await
}

pub async fn questions(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<AssessmentDetail> {
    let assessment = find(db, assessment_id).await?;
    let questions = question::Model::for_assessment(db, assessment_id).await?;
    Ok(AssessmentDetail { assessment, questions })
}

/// The learner's view of an assessment, with any answers already given.
pub async fn paper(db: &DatabaseConnection, assessment_id: &str, user_id: &str) -> ServiceResult<Paper> {
    let assessment = find(db, assessment_id).await?;
    ensure_id(user_id, "user_id")?;
    let assignment = assigned_assessment::Model::find_by_user_and_assessment(db, user_id, assessment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment is not assigned to this user."))?;

    let qs = question::Model::for_assessment(db, assessment_id).await?;
    let ids: Vec<String> = qs.iter().map(|q| q.id.clone()).collect();
    let answers = student_answer::Model::for_user_and_questions(db, user_id, &ids).await?;

    let questions = qs
        .into_iter()
        .map(|q| PaperQuestion {
            answer: answers
                .iter()
                .find(|a| a.question_id == q.id)
                .map(|a| a.student_answer.clone()),
            id: q.id,
            question_number: q.question_number,
            question: q.question,
            question_instruction: q.question_instruction,
        })
        .collect();

    Ok(Paper {
        assessment_id: assessment.id,
        name: assessment.name,
        assessment_type: assessment.assessment_type,
        assessment_instruction: assessment.assessment_instruction,
        case_study_context: assessment.case_study_context,
        duration: assessment.duration,
        assignment,
        questions,
    })
}

pub async fn set_temperature(db: &DatabaseConnection, question_id: &str, temperature: f64) -> ServiceResult<question::Model> {
    ensure_id(question_id, "question_id")?;
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ServiceError::bad_request("Temperature must be between 0 and 2."));
    }
    let existing = question::Model::find_by_id(db, question_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Question not found."))?;
    let mut active = existing.into_active_model();
    active.temperature = Set(temperature);
    Ok(active.update(db).await?)
}

/// Deletes an unassigned assessment and its questions.
pub async fn delete_assessment(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<()> {
    let existing = find(db, assessment_id).await?;
    if assigned_assessment::Model::count_for_assessment(db, assessment_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "Assessment has assignments and cannot be deleted.",
        ));
    }

    let txn = db.begin().await?;
    let removed = question::Model::delete_for_assessment(&txn, assessment_id).await?;
    assessment::Entity::delete_by_id(existing.id.clone()).exec(&txn).await?;
    txn.commit().await?;

    info!(assessment_id = %existing.id, questions = removed, "assessment deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ai_client, mount_extraction, seed_assessment_fixture, seed_learner, seed_sources};
    use db::test_utils::setup_test_db;
    use wiremock::MockServer;

    #[test]
    fn duration_is_first_integer_in_minutes() {
        assert_eq!(parse_duration_seconds("90 minutes"), 5400);
        assert_eq!(parse_duration_seconds("Duration: 2 hours (120 min)"), 120);
        assert_eq!(parse_duration_seconds("untimed"), 0);
        assert_eq!(parse_duration_seconds(""), 0);
    }

    #[tokio::test]
    async fn generation_creates_then_upserts() {
        let db = setup_test_db().await;
        let server = MockServer::start().await;
        mount_extraction(&server, 2).await;
        let ai = ai_client(&server);
        let src = seed_sources(&db).await;

        let input = CreateAssessment {
            course_id: src.course.id.clone(),
            assessment_name: "Case Study 1".into(),
            file_id: src.file.id.clone(),
            grade_id: src.grade.id.clone(),
            ai_model_id: src.ai_model.id.clone(),
        };
        let first = create_from_file(&db, &ai, input.clone()).await.unwrap();
        assert_eq!(first.questions.len(), 2);
        assert_eq!(first.assessment.duration_seconds, 3600);
        assert_eq!(first.questions[0].suggested_answer.0, vec!["Answer 1".to_string()]);

        let again = create_from_file(&db, &ai, input).await.unwrap();
        assert_eq!(again.assessment.id, first.assessment.id);
        assert_eq!(question::Model::count_for_assessment(&db, &first.assessment.id).await.unwrap(), 2);
        assert_eq!(assessments_for_course(&db, &src.course.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn assigned_assessments_are_not_regenerated() {
        let db = setup_test_db().await;
        let server = MockServer::start().await;
        mount_extraction(&server, 2).await;
        let ai = ai_client(&server);
        let src = seed_sources(&db).await;

        let input = CreateAssessment {
            course_id: src.course.id.clone(),
            assessment_name: "Case Study 1".into(),
            file_id: src.file.id.clone(),
            grade_id: src.grade.id.clone(),
            ai_model_id: src.ai_model.id.clone(),
        };
        let first = create_from_file(&db, &ai, input.clone()).await.unwrap();
        let learner = seed_learner(&db, "l@x.com", &[src.course.code.as_str()]).await;
        assigned_assessment::Model::create(&db, &learner.id, &first.assessment.id, 60).await.unwrap();

        let err = create_from_file(&db, &ai, input).await.unwrap_err();
        assert_eq!(err.to_string(), "Assessment has assignments and cannot be regenerated.");

        let kept = question::Model::for_assessment(&db, &first.assessment.id).await.unwrap();
        let kept_ids: Vec<_> = kept.iter().map(|q| q.id.clone()).collect();
        let first_ids: Vec<_> = first.questions.iter().map(|q| q.id.clone()).collect();
        assert_eq!(kept_ids, first_ids);
    }

    #[tokio::test]
    async fn invalid_ids_are_rejected_before_any_call() {
        let db = setup_test_db().await;
        let server = MockServer::start().await;
        let ai = ai_client(&server);
        let err = create_from_file(
            &db,
            &ai,
            CreateAssessment {
                course_id: "bad".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid course_id.");
    }

    #[tokio::test]
    async fn paper_hides_suggested_answers_and_requires_assignment() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 2).await;
        let learner = seed_learner(&db, "l@x.com", &[fx.course.code.as_str()]).await;

        assert!(matches!(
            paper(&db, &fx.assessment.id, &learner.id).await,
            Err(ServiceError::NotFound(_))
        ));

        assigned_assessment::Model::create(&db, &learner.id, &fx.assessment.id, 60).await.unwrap();
        let p = paper(&db, &fx.assessment.id, &learner.id).await.unwrap();
        assert_eq!(p.questions.len(), 2);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json["questions"][0].get("suggested_answer").is_none());
    }

    #[tokio::test]
    async fn temperature_bounds() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let q = &fx.questions[0];
        assert!(matches!(set_temperature(&db, &q.id, 3.0).await, Err(ServiceError::BadRequest(_))));
        assert_eq!(set_temperature(&db, &q.id, 0.7).await.unwrap().temperature, 0.7);
    }

    #[tokio::test]
    async fn delete_refuses_assigned_assessments() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 2).await;
        let learner = seed_learner(&db, "l@x.com", &[]).await;
        assigned_assessment::Model::create(&db, &learner.id, &fx.assessment.id, 0).await.unwrap();
        assert!(matches!(
            delete_assessment(&db, &fx.assessment.id).await,
            Err(ServiceError::BadRequest(_))
        ));

        let other = seed_assessment_fixture(&db, 3).await;
        delete_assessment(&db, &other.assessment.id).await.unwrap();
        assert_eq!(question::Model::count_for_assessment(&db, &other.assessment.id).await.unwrap(), 0);
    }
}
