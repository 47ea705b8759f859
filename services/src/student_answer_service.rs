use chrono::Utc;
use db::models::{
    assigned_assessment::{self, AssignmentStatus},
    question, student_answer,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, IntoActiveModel};
use serde::Deserialize;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{ensure_id, required};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmitAnswer {
    pub user_id: String,
    pub question_id: String,
    pub student_answer: Option<String>,
    pub formatted_answer: Option<String>,
}

/// Partial update; assessors use it for remarks and the marked flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnswerUpdate {
    pub student_answer: Option<String>,
    pub formatted_answer: Option<String>,
    pub human_assess_remarks: Option<String>,
    pub is_marked: Option<bool>,
}

pub async fn find(db: &DatabaseConnection, answer_id: &str) -> ServiceResult<student_answer::Model> {
    ensure_id(answer_id, "answer_id")?;
    student_answer::Model::find_by_id(db, answer_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student answer not found."))
}

/// Stores a learner's answer, replacing any earlier answer to the same question.
///
/// The learner must hold an open assignment (pending, in progress or
/// resubmission) for the question's assessment.
pub async fn submit(db: &DatabaseConnection, input: SubmitAnswer) -> ServiceResult<student_answer::Model> {
    ensure_id(&input.user_id, "user_id")?;
    ensure_id(&input.question_id, "question_id")?;
    let text = required(input.student_answer.as_deref(), "Student answer")?;

    let q = question::Model::find_by_id(db, &input.question_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Question not found."))?;
    let assignment = assigned_assessment::Model::find_by_user_and_assessment(db, &input.user_id, &q.assessment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment is not assigned to this user."))?;
    if !matches!(
        assignment.status,
        AssignmentStatus::Pending | AssignmentStatus::InProgress | AssignmentStatus::Resubmission
    ) {
        return Err(ServiceError::BadRequest(format!(
            "Answers cannot be submitted while the assessment is {}.",
            assignment.status
        )));
    }

    let saved = match student_answer::Model::find_by_user_and_question(db, &input.user_id, &q.id).await? {
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.student_answer = Set(text);
            active.formatted_answer = Set(input.formatted_answer);
            active.updated_at = Set(Utc::now());
            active.update(db).await?
        }
        None => student_answer::Model::create(db, &input.user_id, &q.id, &text, input.formatted_answer).await?,
    };
    info!(answer_id = %saved.id, question_id = %q.id, "answer saved");
    Ok(saved)
}

pub async fn update(db: &DatabaseConnection, answer_id: &str, input: AnswerUpdate) -> ServiceResult<student_answer::Model> {
    let existing = find(db, answer_id).await?;
    let mut active = existing.into_active_model();
    if let Some(text) = input.student_answer {
        active.student_answer = Set(required(Some(&text), "Student answer")?);
    }
    if let Some(formatted) = input.formatted_answer {
        active.formatted_answer = Set(Some(formatted));
    }
    if let Some(remarks) = input.human_assess_remarks {
        active.human_assess_remarks = Set(Some(remarks));
    }
    if let Some(marked) = input.is_marked {
        active.is_marked = Set(marked);
    }
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<student_answer::Model>> {
    Ok(student_answer::Model::list_all(db).await?)
}

pub async fn by_user_and_question(
    db: &DatabaseConnection,
    user_id: &str,
    question_id: &str,
) -> ServiceResult<student_answer::Model> {
    ensure_id(user_id, "user_id")?;
    ensure_id(question_id, "question_id")?;
    student_answer::Model::find_by_user_and_question(db, user_id, question_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student answer not found."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_assessment_fixture, seed_learner};
    use db::test_utils::setup_test_db;

    fn submission(user_id: &str, question_id: &str, text: &str) -> SubmitAnswer {
        SubmitAnswer {
            user_id: user_id.into(),
            question_id: question_id.into(),
            student_answer: Some(text.into()),
            formatted_answer: None,
        }
    }

    #[tokio::test]
    async fn resubmitting_replaces_the_answer() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let learner = seed_learner(&db, "l@x.com", &[]).await;
        assigned_assessment::Model::create(&db, &learner.id, &fx.assessment.id, 60).await.unwrap();
        let q = &fx.questions[0].id;

        let first = submit(&db, submission(&learner.id, q, "draft")).await.unwrap();
        let second = submit(&db, submission(&learner.id, q, "final")).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(by_user_and_question(&db, &learner.id, q).await.unwrap().student_answer, "final");
        assert_eq!(list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submission_needs_an_open_assignment_and_text() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let learner = seed_learner(&db, "l@x.com", &[]).await;
        let q = &fx.questions[0].id;

        assert!(matches!(
            submit(&db, submission(&learner.id, q, "text")).await,
            Err(ServiceError::NotFound(_))
        ));

        let a = assigned_assessment::Model::create(&db, &learner.id, &fx.assessment.id, 60).await.unwrap();
        assert_eq!(
            submit(&db, submission(&learner.id, q, "  ")).await.unwrap_err().to_string(),
            "Student answer is required."
        );

        let mut closed = a.into_active_model();
        closed.status = Set(AssignmentStatus::Completed);
        closed.update(&db).await.unwrap();
        assert!(matches!(
            submit(&db, submission(&learner.id, q, "late")).await,
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn assessor_remarks_are_partial() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let learner = seed_learner(&db, "l@x.com", &[]).await;
        assigned_assessment::Model::create(&db, &learner.id, &fx.assessment.id, 60).await.unwrap();
        let saved = submit(&db, submission(&learner.id, &fx.questions[0].id, "answer")).await.unwrap();

        let updated = update(
            &db,
            &saved.id,
            AnswerUpdate {
                human_assess_remarks: Some("Needs detail".into()),
                is_marked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.student_answer, "answer");
        assert_eq!(updated.human_assess_remarks.as_deref(), Some("Needs detail"));
        assert!(updated.is_marked);
        assert!(matches!(find(&db, "nope").await, Err(ServiceError::BadRequest(_))));
    }
}
