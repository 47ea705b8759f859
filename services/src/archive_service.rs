//! Read and purge access to answers archived by reassignment.

use db::models::{archived_student_answer, assessment, question};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::ensure_id;

/// Every archived answer to the assessment's questions, newest first.
pub async fn for_assessment(
    db: &DatabaseConnection,
    assessment_id: &str,
) -> ServiceResult<Vec<archived_student_answer::Model>> {
    ensure_id(assessment_id, "assessment_id")?;
    if assessment::Model::find_by_id(db, assessment_id).await?.is_none() {
        return Err(ServiceError::not_found("Assessment not found."));
    }
    let ids = question::Model::ids_for_assessment(db, assessment_id).await?;
    Ok(archived_student_answer::Model::for_questions(db, &ids).await?)
}

pub async fn for_user_and_question(
    db: &DatabaseConnection,
    user_id: &str,
    question_id: &str,
) -> ServiceResult<Vec<archived_student_answer::Model>> {
    ensure_id(user_id, "user_id")?;
    ensure_id(question_id, "question_id")?;
    Ok(archived_student_answer::Model::for_user_and_question(db, user_id, question_id).await?)
}

/// Removes a learner's archive for one question; 404 when there is none.
pub async fn purge(db: &DatabaseConnection, user_id: &str, question_id: &str) -> ServiceResult<u64> {
    ensure_id(user_id, "user_id")?;
    ensure_id(question_id, "question_id")?;
    let removed = archived_student_answer::Model::delete_for_user_and_question(db, user_id, question_id).await?;
    if removed == 0 {
        return Err(ServiceError::not_found("No archived answers found."));
    }
    info!(user_id, question_id, removed, "archived answers removed");
    Ok(removed)
}
