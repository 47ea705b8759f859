use std::collections::HashMap;
use std::str::FromStr;

use ai::AiClient;
use chrono::Utc;
use db::models::{
    archived_student_answer, assessment,
    assigned_assessment::{self, AssignmentStatus},
    course, enrollment, question, student_answer,
    user::{self, Role},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::evaluation;
use crate::validation::ensure_id;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignRequest {
    pub learners: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReassignRequest {
    pub user_id: String,
    pub assessment_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignOutcome {
    pub assigned: Vec<assigned_assessment::Model>,
    /// Learners who already had this assessment.
    pub already_assigned: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReassignOutcome {
    pub assignment: assigned_assessment::Model,
    pub archived: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusOutcome {
    pub assignment: assigned_assessment::Model,
    /// Answers scored by the evaluator; zero unless the new status is `completed`.
    pub evaluated: usize,
}

/// An assignment with its assessment's name and type.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    #[serde(flatten)]
    pub assignment: assigned_assessment::Model,
    pub assessment_name: String,
    pub assessment_type: String,
    pub course_id: String,
}

/// An assignment with the assignee's identity.
#[derive(Debug, Clone, Serialize)]
pub struct Assignee {
    #[serde(flatten)]
    pub assignment: assigned_assessment::Model,
    pub user_name: String,
    pub user_email: String,
}

pub async fn find(db: &DatabaseConnection, assignment_id: &str) -> ServiceResult<assigned_assessment::Model> {
    ensure_id(assignment_id, "assignment_id")?;
    assigned_assessment::Model::find_by_id(db, assignment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assigned assessment not found."))
}

async fn find_assessment(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<assessment::Model> {
    ensure_id(assessment_id, "assessment_id")?;
    assessment::Model::find_by_id(db, assessment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assessment not found."))
}

/// Assigns an assessment to learners, binding each to the assessment's course.
///
/// Every learner id must name a learner. Learners that already hold the
/// assessment are reported and left unchanged.
pub async fn assign(db: &DatabaseConnection, assessment_id: &str, request: AssignRequest) -> ServiceResult<AssignOutcome> {
    let assessment = find_assessment(db, assessment_id).await?;
    if request.learners.is_empty() {
        return Err(ServiceError::bad_request("At least one learner is required."));
    }
    let course = course::Model::find_by_id(db, &assessment.course_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Course not found."))?;

    let mut learners = request.learners.clone();
    learners.sort();
    learners.dedup();
    for id in &learners {
        ensure_id(id, "learner id")?;
        match user::Model::find_by_id(db, id).await? {
            Some(u) if u.role == Role::Learner => {}
            Some(_) => return Err(ServiceError::BadRequest(format!("User {id} is not a learner."))),
            None => return Err(ServiceError::NotFound(format!("User {id} not found."))),
        }
    }

    let txn = db.begin().await?;
    let mut assigned = Vec::new();
    let mut already_assigned = Vec::new();
    for id in learners {
        if assigned_assessment::Model::find_by_user_and_assessment(&txn, &id, &assessment.id)
            .await?
            .is_some()
        {
            already_assigned.push(id);
            continue;
        }
        enrollment::Model::add_codes(&txn, &id, std::slice::from_ref(&course.code)).await?;
        assigned.push(
            assigned_assessment::Model::create(&txn, &id, &assessment.id, assessment.duration_seconds).await?,
        );
    }
    txn.commit().await?;

    info!(
        assessment_id = %assessment.id,
        assigned = assigned.len(),
        skipped = already_assigned.len(),
        "assessment assigned"
    );
    Ok(AssignOutcome {
        assigned,
        already_assigned,
    })
}

/// Gives a learner a fresh attempt.
///
/// Their answers to this assessment's questions are archived and removed, the
/// status returns to `pending` and the clock is reset, all in one transaction.
pub async fn reassign(db: &DatabaseConnection, request: ReassignRequest) -> ServiceResult<ReassignOutcome> {
    ensure_id(&request.user_id, "user_id")?;
    let assessment = find_assessment(db, &request.assessment_id).await?;
    let current = assigned_assessment::Model::find_by_user_and_assessment(db, &request.user_id, &assessment.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Assigned assessment not found."))?;

    let now = Utc::now();
    let txn = db.begin().await?;
    let question_ids = question::Model::ids_for_assessment(&txn, &assessment.id).await?;
    let answers = student_answer::Model::for_user_and_questions(&txn, &request.user_id, &question_ids).await?;
    if !answers.is_empty() {
        let archives = answers
            .iter()
            .map(|a| archived_student_answer::Model::from_answer(a, now));
        archived_student_answer::Entity::insert_many(archives).exec(&txn).await?;
        let ids: Vec<String> = answers.iter().map(|a| a.id.clone()).collect();
        student_answer::Model::delete_by_ids(&txn, &ids).await?;
    }
    let mut active = current.into_active_model();
    active.status = Set(AssignmentStatus::Pending);
    active.remaining_time = Set(assessment.duration_seconds);
    active.updated_at = Set(now);
    let assignment = active.update(&txn).await?;
    txn.commit().await?;

    info!(assignment_id = %assignment.id, archived = answers.len(), "assessment reassigned");
    Ok(ReassignOutcome {
        assignment,
        archived: answers.len(),
    })
}

/// Sets the status of an assignment; `completed` triggers evaluation.
///
/// Moves not allowed by [`AssignmentStatus::can_transition_to`] are rejected,
/// so an expired or already completed attempt cannot be resubmitted. The
/// status change is kept even when evaluation fails.
pub async fn update_status(
    db: &DatabaseConnection,
    ai: &AiClient,
    assignment_id: &str,
    status: &str,
) -> ServiceResult<StatusOutcome> {
    let status = AssignmentStatus::from_str(status.trim())
        .map_err(|_| ServiceError::bad_request("Invalid status."))?;
    let existing = find(db, assignment_id).await?;
    if !existing.status.can_transition_to(status) {
        return Err(ServiceError::BadRequest(format!(
            "Cannot change status from {} to {}.",
            existing.status, status
        )));
    }

    let mut active = existing.into_active_model();
    active.status = Set(status);
    active.updated_at = Set(Utc::now());
    let assignment = active.update(db).await?;

    let evaluated = if status == AssignmentStatus::Completed {
        evaluation::evaluate_assignment(db, ai, &assignment).await?
    } else {
        0
    };
    Ok(StatusOutcome { assignment, evaluated })
}

/// Starts the clock: `pending` or `resubmission` become `in_progress`.
pub async fn start(db: &DatabaseConnection, assignment_id: &str) -> ServiceResult<assigned_assessment::Model> {
    let existing = find(db, assignment_id).await?;
    if !matches!(existing.status, AssignmentStatus::Pending | AssignmentStatus::Resubmission) {
        return Err(ServiceError::BadRequest(format!(
            "Assessment cannot be started while {}.",
            existing.status
        )));
    }
    let mut active = existing.into_active_model();
    active.status = Set(AssignmentStatus::InProgress);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, assignment_id: &str) -> ServiceResult<()> {
    let existing = find(db, assignment_id).await?;
    assigned_assessment::Entity::delete_by_id(existing.id.clone())
        .exec(db)
        .await?;
    info!(assignment_id = %existing.id, "assignment deleted");
    Ok(())
}

/// Assignments filtered by learner and/or assessment.
pub async fn list(
    db: &DatabaseConnection,
    user_id: Option<&str>,
    assessment_id: Option<&str>,
) -> ServiceResult<Vec<assigned_assessment::Model>> {
    if let Some(id) = user_id {
        ensure_id(id, "user_id")?;
    }
    if let Some(id) = assessment_id {
        ensure_id(id, "assessment_id")?;
    }
    match (user_id, assessment_id) {
        (Some(u), Some(a)) => Ok(assigned_assessment::Model::find_by_user_and_assessment(db, u, a)
            .await?
            .into_iter()
            .collect()),
        (Some(u), None) => Ok(assigned_assessment::Model::for_user(db, u).await?),
        (None, Some(a)) => Ok(assigned_assessment::Model::for_assessment(db, a).await?),
        (None, None) => Ok(assigned_assessment::Entity::find().all(db).await?),
    }
}

pub async fn assignees(db: &DatabaseConnection, assessment_id: &str) -> ServiceResult<Vec<Assignee>> {
    let assessment = find_assessment(db, assessment_id).await?;
    let mut out = Vec::new();
    for assignment in assigned_assessment::Model::for_assessment(db, &assessment.id).await? {
        match user::Model::find_by_id(db, &assignment.user_id).await? {
            Some(u) => out.push(Assignee {
                assignment,
                user_name: u.name,
                user_email: u.email,
            }),
            None => warn!(assignment_id = %assignment.id, "assignment without user"),
        }
    }
    Ok(out)
}

/// A learner's assignments within one course, with assessment name and type.
pub async fn for_user_course(db: &DatabaseConnection, user_id: &str, course_id: &str) -> ServiceResult<Vec<AssignmentSummary>> {
    ensure_id(user_id, "user_id")?;
    ensure_id(course_id, "course_id")?;
    let assessments: HashMap<String, assessment::Model> = assessment::Model::for_course(db, course_id)
        .await?
        .into_iter()
        .map(|a| (a.id.clone(), a))
        .collect();

    Ok(assigned_assessment::Model::for_user(db, user_id)
        .await?
        .into_iter()
        .filter_map(|assignment| {
            let a = assessments.get(&assignment.assessment_id)?;
            Some(AssignmentSummary {
                assessment_name: a.name.clone(),
                assessment_type: a.assessment_type.clone(),
                course_id: a.course_id.clone(),
                assignment,
            })
        })
        .collect())
}
