use chrono::Utc;
use db::models::{assessment, grade, grade_range};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{ensure_id, required};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GradeInput {
    pub name: Option<String>,
}

/// A grade together with its ranges, lowest first.
#[derive(Debug, Clone, Serialize)]
pub struct GradeView {
    #[serde(flatten)]
    pub grade: grade::Model,
    pub ranges: Vec<grade_range::Model>,
}

pub async fn find(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<grade::Model> {
    ensure_id(grade_id, "grade_id")?;
    grade::Model::find_by_id(db, grade_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Grade not found."))
}

/// New grades start unconfigured until their first range is added.
pub async fn create_grade(db: &DatabaseConnection, input: GradeInput) -> ServiceResult<grade::Model> {
    let name = required(input.name.as_deref(), "Name")?;
    let created = grade::Model::create(db, &name).await?;
    info!(grade_id = %created.id, "grade created");
    Ok(created)
}

pub async fn list_grades(db: &DatabaseConnection, configured_only: bool) -> ServiceResult<Vec<grade::Model>> {
    Ok(grade::Model::list(db, configured_only).await?)
}

pub async fn get_grade(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<GradeView> {
    let grade = find(db, grade_id).await?;
    let ranges = grade_range::Model::for_grade(db, grade_id).await?;
    Ok(GradeView { grade, ranges })
}

pub async fn update_grade(db: &DatabaseConnection, grade_id: &str, input: GradeInput) -> ServiceResult<grade::Model> {
    let existing = find(db, grade_id).await?;
    let name = required(input.name.as_deref(), "Name")?;
    let mut active = existing.into_active_model();
    active.name = Set(name);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Deletes an unused grade and all of its ranges.
pub async fn delete_grade(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<()> {
    let existing = find(db, grade_id).await?;
    if assessment::Model::count_where(db, assessment::Column::GradeId, grade_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "Grade is used by an assessment and cannot be deleted.",
        ));
    }

    let txn = db.begin().await?;
    let removed = grade_range::Model::delete_for_grade(&txn, grade_id).await?;
    grade::Entity::delete_by_id(existing.id.clone()).exec(&txn).await?;
    txn.commit().await?;

    info!(grade_id = %existing.id, ranges = removed, "grade deleted");
    Ok(())
}
