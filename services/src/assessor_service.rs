//! Assessor reporting: assignment progress, aggregated scores and per-answer
//! AI feedback.

use db::models::{
    ai_model, assessment,
    assigned_assessment::{self, AssignmentStatus},
    grade_range::{self, RangeLabel},
    question, student_answer, user,
};
use marker::{Competency, GradeBand, ScoredAnswer, StudentVerdict, Weights};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::ensure_id;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentProgress {
    pub assessment_id: String,
    pub name: String,
    pub assessment_type: String,
    pub total_assigned: u64,
    pub total_completed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentScore {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub question_count: usize,
    #[serde(flatten)]
    pub verdict: StudentVerdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub assessment_id: String,
    pub weights: Weights,
    pub students: Vec<StudentScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub question_id: String,
    pub question_number: String,
    pub question: String,
    pub answer: Option<student_answer::Model>,
    /// Weighted contribution of this answer to the learner's total.
    pub contribution: f64,
    /// Label of the contribution alone; the overall verdict uses the total.
    pub label: Competency,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiReport {
    pub question: String,
    pub suggested_answer: String,
    pub student_answer: String,
    pub first_model: String,
    pub first_score: Option<f64>,
    pub first_score_feedback: Option<String>,
    pub second_model: String,
    pub second_score: Option<f64>,
    pub second_score_feedback: Option<String>,
    pub weighted_score: f64,
    pub human_assess_remarks: Option<String>,
}

fn band(range: &grade_range::Model) -> GradeBand {
    let label = match range.label {
        RangeLabel::Competent => Competency::Competent,
        RangeLabel::NotCompetent => Competency::NotCompetent,
    };
    GradeBand::new(range.start_range, range.end_range, label)
}

async fn bands_for(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<Vec<GradeBand>> {
    Ok(grade_range::Model::for_grade(db, grade_id)
        .await?
        .iter()
        .map(band)
        .collect())
}

async fn weights_for(db: &DatabaseConnection, assessment: &assessment::Model) -> ServiceResult<(ai_model::Model, Weights)> {
    let model = ai_model::Model::find_by_id(db, &assessment.ai_model_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("AI model not found."))?;
    let weights = Weights::new(model.first_weight, model.second_weight);
    Ok((model, weights))
}

async fn find_assessment(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<assessment::Model> {
    ensure_id(assessment_id, "assessment_id")?;
    assessment::Model::find_by_id(db, assessment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment not found."))
}

/// Assigned and completed counts for every assessment of a course.
pub async fn overview(db: &DatabaseConnection, course_id: &str) -> ServiceResult<Vec<AssessmentProgress>> {
    ensure_id(course_id, "course_id")?;
    let mut out = Vec::new();
    for a in assessment::Model::for_course(db, course_id).await? {
        let assignments = assigned_assessment::Model::for_assessment(db, &a.id).await?;
        out.push(AssessmentProgress {
            total_assigned: assignments.len() as u64,
            total_completed: assignments
                .iter()
                .filter(|x| x.status == AssignmentStatus::Completed)
                .count() as u64,
            assessment_id: a.id,
            name: a.name,
            assessment_type: a.assessment_type,
        });
    }
    Ok(out)
}

/// Competency verdicts for every learner who completed the assessment.
pub async fn scores(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<ScoreReport> {
    let assessment = find_assessment(db, assessment_id).await?;
    let (_, weights) = weights_for(db, &assessment).await?;
    let bands = bands_for(db, &assessment.grade_id).await?;

    let completed: Vec<String> = assigned_assessment::Model::for_assessment(db, &assessment.id)
        .await?
        .into_iter()
        .filter(|a| a.status == AssignmentStatus::Completed)
        .map(|a| a.user_id)
        .collect();

    let question_ids = question::Model::ids_for_assessment(db, &assessment.id).await?;
    let answers: Vec<ScoredAnswer> = student_answer::Model::for_questions(db, &question_ids)
        .await?
        .into_iter()
        .map(|a| ScoredAnswer {
            student_id: a.user_id,
            first_score: a.first_score,
            second_score: a.second_score,
        })
        .collect();

    let verdicts = marker::aggregate(&completed, &answers, &weights, &bands)?;

    let mut students = Vec::with_capacity(verdicts.len());
    for verdict in verdicts {
        let Some(u) = user::Model::find_by_id(db, &verdict.student_id).await? else {
            continue;
        };
        students.push(StudentScore {
            user_id: u.id,
            name: u.name,
            email: u.email,
            question_count: question_ids.len(),
            verdict,
        });
    }
    debug!(assessment_id = %assessment.id, students = students.len(), "scores computed");

    Ok(ScoreReport {
        assessment_id: assessment.id,
        weights,
        students,
    })
}

/// One learner's answers, question by question, with per-question contributions.
pub async fn responses(db: &DatabaseConnection, user_id: &str, assessment_id: &str) -> ServiceResult<Vec<QuestionResponse>> {
    ensure_id(user_id, "user_id")?;
    let assessment = find_assessment(db, assessment_id).await?;
    let (_, weights) = weights_for(db, &assessment).await?;
    let bands = bands_for(db, &assessment.grade_id).await?;

    let questions = question::Model::for_assessment(db, &assessment.id).await?;
    let ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();
    let mut answers = student_answer::Model::for_user_and_questions(db, user_id, &ids).await?;

    let mut out = Vec::with_capacity(questions.len());
    for q in questions {
        let answer = answers
            .iter()
            .position(|a| a.question_id == q.id)
            .map(|i| answers.swap_remove(i));
        let contribution = marker::weighted_contribution(
            answer.as_ref().and_then(|a| a.first_score),
            answer.as_ref().and_then(|a| a.second_score),
            &weights,
        )?;
        out.push(QuestionResponse {
            question_id: q.id,
            question_number: q.question_number,
            question: q.question,
            answer,
            contribution,
            label: marker::resolve_label(contribution, &bands),
        });
    }
    Ok(out)
}

/// The AI scores and feedback behind one answer.
pub async fn ai_report(db: &DatabaseConnection, user_id: &str, question_id: &str) -> ServiceResult<AiReport> {
    ensure_id(user_id, "user_id")?;
    ensure_id(question_id, "question_id")?;
    let q = question::Model::find_by_id(db, question_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Question not found."))?;
    let answer = student_answer::Model::find_by_user_and_question(db, user_id, question_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student answer not found."))?;
    let assessment = find_assessment(db, &q.assessment_id).await?;
    let (model, weights) = weights_for(db, &assessment).await?;

    Ok(AiReport {
        weighted_score: marker::weighted_contribution(answer.first_score, answer.second_score, &weights)?,
        question: q.question,
        suggested_answer: q.suggested_answer.joined(),
        student_answer: answer.student_answer,
        first_model: model.first_model,
        first_score: answer.first_score,
        first_score_feedback: answer.first_score_feedback,
        second_model: model.second_model,
        second_score: answer.second_score,
        second_score_feedback: answer.second_score_feedback,
        human_assess_remarks: answer.human_assess_remarks,
    })
}
