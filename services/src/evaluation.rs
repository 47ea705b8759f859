//! AI scoring of a completed assignment.

use ai::{AiClient, EvaluationItem};
use chrono::Utc;
use db::models::{ai_model, assessment, assigned_assessment, grade_range, question, student_answer};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, IntoActiveModel, TransactionTrait};
use tracing::{info, instrument};

use crate::error::{ServiceError, ServiceResult};

/// Marks ceiling of a grade: the highest range end, or 0 without ranges.
pub async fn marks_ceiling(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<f64> {
    Ok(grade_range::Model::for_grade(db, grade_id)
        .await?
        .iter()
        .map(|r| r.end_range)
        .fold(0.0, f64::max))
}

/// Scores every answer of the assignment's learner with both ensemble models.
///
/// Answers with blank text, and questions without a suggested answer, are
/// skipped. Returns the number of answers scored.
#[instrument(skip_all, fields(assignment_id = %assignment.id))]
pub async fn evaluate_assignment(
    db: &DatabaseConnection,
    ai: &AiClient,
    assignment: &assigned_assessment::Model,
) -> ServiceResult<usize> {
    let assessment = assessment::Model::find_by_id(db, &assignment.assessment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment not found."))?;
    let model = ai_model::Model::find_by_id(db, &assessment.ai_model_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("AI model not found."))?;
    let marks = marks_ceiling(db, &assessment.grade_id).await?;

    let questions = question::Model::for_assessment(db, &assessment.id).await?;
    let ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();
    let answers = student_answer::Model::for_user_and_questions(db, &assignment.user_id, &ids).await?;

    let mut scored = Vec::new();
    let mut first_items = Vec::new();
    let mut second_items = Vec::new();
    for answer in answers {
        let Some(q) = questions.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };
        let suggested = q.suggested_answer.joined();
        if answer.student_answer.trim().is_empty() || suggested.trim().is_empty() {
            continue;
        }
        let item = |model_name: &str| EvaluationItem {
            question: q.question.clone(),
            suggested_answer: suggested.clone(),
            student_answer: answer.student_answer.clone(),
            marks,
            temperature: q.temperature,
            comparison_instruction: q.comparison_instruction.clone(),
            comparison_count: q.comparison_count,
            provider: model.provider.clone(),
            model: model_name.to_owned(),
        };
        first_items.push(item(&model.first_model));
        second_items.push(item(&model.second_model));
        scored.push(answer);
    }

    if scored.is_empty() {
        info!("nothing to evaluate");
        return Ok(0);
    }

    let first = ai.evaluate(&model.first_model, &first_items).await?;
    let second = ai.evaluate(&model.second_model, &second_items).await?;

    let now = Utc::now();
    let txn = db.begin().await?;
    for ((answer, a), b) in scored.into_iter().zip(first).zip(second) {
        let mut active = answer.into_active_model();
        active.first_score = Set(Some(a.score));
        active.first_score_feedback = Set(Some(a.feedback));
        active.second_score = Set(Some(b.score));
        active.second_score_feedback = Set(Some(b.feedback));
        active.updated_at = Set(now);
        active.update(&txn).await?;
    }
    txn.commit().await?;

    info!(count = first_items.len(), "answers evaluated");
    Ok(first_items.len())
}
