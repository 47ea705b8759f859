use std::str::FromStr;

use chrono::Utc;
use db::models::{
    assessment, grade,
    grade_range::{self, RangeLabel},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::ensure_id;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RangeInput {
    pub grade_id: Option<String>,
    pub label: Option<String>,
    pub start_range: Option<f64>,
    pub end_range: Option<f64>,
}

fn parse_label(raw: &str) -> ServiceResult<RangeLabel> {
    RangeLabel::from_str(raw.trim())
        .map_err(|_| ServiceError::bad_request("Label must be 'competent' or 'not-competent'."))
}

async fn find(db: &DatabaseConnection, range_id: &str) -> ServiceResult<grade_range::Model> {
    ensure_id(range_id, "range_id")?;
    grade_range::Model::find_by_id(db, range_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Grade range not found."))
}

/// Adds a range to a grade and marks the grade configured.
pub async fn create_range(db: &DatabaseConnection, input: RangeInput) -> ServiceResult<grade_range::Model> {
    let grade_id = input
        .grade_id
        .ok_or_else(|| ServiceError::bad_request("grade_id is required."))?;
    ensure_id(&grade_id, "grade_id")?;
    let label = parse_label(
        input
            .label
            .as_deref()
            .ok_or_else(|| ServiceError::bad_request("Label is required."))?,
    )?;
    let (Some(start), Some(end)) = (input.start_range, input.end_range) else {
        return Err(ServiceError::bad_request("start_range and end_range are required."));
    };
    if start < 0.0 {
        return Err(ServiceError::bad_request("start_range must not be negative."));
    }
    if start == end {
        return Err(ServiceError::bad_request("start_range and end_range must differ."));
    }
    if start > end {
        return Err(ServiceError::bad_request("start_range must be less than end_range."));
    }
    if grade::Model::find_by_id(db, &grade_id).await?.is_none() {
        return Err(ServiceError::not_found("Grade not found."));
    }

    let txn = db.begin().await?;
    let created = grade_range::Model::create(&txn, &grade_id, label, start, end).await?;
    grade::Model::set_configured(&txn, &grade_id, true).await?;
    txn.commit().await?;
    Ok(created)
}

pub async fn ranges_for_grade(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<Vec<grade_range::Model>> {
    ensure_id(grade_id, "grade_id")?;
    let ranges = grade_range::Model::for_grade(db, grade_id).await?;
    if ranges.is_empty() {
        return Err(ServiceError::not_found("No grade ranges found for this grade."));
    }
    Ok(ranges)
}

pub async fn update_range(db: &DatabaseConnection, range_id: &str, input: RangeInput) -> ServiceResult<grade_range::Model> {
    let existing = find(db, range_id).await?;
    let start = input.start_range.unwrap_or(existing.start_range);
    let end = input.end_range.unwrap_or(existing.end_range);
    if start < 0.0 {
        return Err(ServiceError::bad_request("start_range must not be negative."));
    }
    if start > end {
        return Err(ServiceError::bad_request("start_range must be less than end_range."));
    }

    let mut active = existing.into_active_model();
    if let Some(raw) = input.label.as_deref() {
        active.label = Set(parse_label(raw)?);
    }
    active.start_range = Set(start);
    active.end_range = Set(end);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Removes a range; the grade becomes unconfigured when its last range goes.
pub async fn delete_range(db: &DatabaseConnection, range_id: &str) -> ServiceResult<()> {
    let existing = find(db, range_id).await?;
    if assessment::Model::count_where(db, assessment::Column::GradeId, &existing.grade_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "Grade is used by an assessment; its ranges cannot be deleted.",
        ));
    }

    let txn = db.begin().await?;
    grade_range::Entity::delete_by_id(existing.id.clone()).exec(&txn).await?;
    if grade_range::Model::count_for_grade(&txn, &existing.grade_id).await? == 0 {
        grade::Model::set_configured(&txn, &existing.grade_id, false).await?;
    }
    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_assessment_fixture;
    use db::test_utils::setup_test_db;

    fn range(grade_id: &str, label: &str, start: f64, end: f64) -> RangeInput {
        RangeInput {
            grade_id: Some(grade_id.into()),
            label: Some(label.into()),
            start_range: Some(start),
            end_range: Some(end),
        }
    }

    #[tokio::test]
    async fn create_validates_bounds_and_marks_grade_configured() {
        let db = setup_test_db().await;
        let g = grade::Model::create(&db, "Scale").await.unwrap();

        for bad in [
            range(&g.id, "competent", -1.0, 10.0),
            range(&g.id, "competent", 5.0, 5.0),
            range(&g.id, "competent", 10.0, 5.0),
            range(&g.id, "excellent", 0.0, 5.0),
        ] {
            assert!(matches!(create_range(&db, bad).await, Err(ServiceError::BadRequest(_))));
        }
        assert!(matches!(
            create_range(&db, range("65f1a2b3c4d5e6f7a8b9c0d1", "competent", 0.0, 5.0)).await,
            Err(ServiceError::NotFound(_))
        ));

        create_range(&db, range(&g.id, "not-competent", 0.0, 49.99)).await.unwrap();
        let refreshed = grade::Model::find_by_id(&db, &g.id).await.unwrap().unwrap();
        assert!(refreshed.configured);
        assert_eq!(ranges_for_grade(&db, &g.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removing_the_last_range_unconfigures_the_grade() {
        let db = setup_test_db().await;
        let g = grade::Model::create(&db, "Scale").await.unwrap();
        let a = create_range(&db, range(&g.id, "not-competent", 0.0, 49.99)).await.unwrap();
        let b = create_range(&db, range(&g.id, "competent", 50.0, 100.0)).await.unwrap();

        delete_range(&db, &a.id).await.unwrap();
        assert!(grade::Model::find_by_id(&db, &g.id).await.unwrap().unwrap().configured);
        delete_range(&db, &b.id).await.unwrap();
        assert!(!grade::Model::find_by_id(&db, &g.id).await.unwrap().unwrap().configured);
        assert!(matches!(ranges_for_grade(&db, &g.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_is_partial_and_rejects_inverted_bounds() {
        let db = setup_test_db().await;
        let g = grade::Model::create(&db, "Scale").await.unwrap();
        let r = create_range(&db, range(&g.id, "competent", 50.0, 100.0)).await.unwrap();

        let err = update_range(
            &db,
            &r.id,
            RangeInput {
                start_range: Some(150.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));

        let updated = update_range(
            &db,
            &r.id,
            RangeInput {
                end_range: Some(200.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.start_range, 50.0);
        assert_eq!(updated.end_range, 200.0);
        assert_eq!(updated.label, RangeLabel::Competent);
    }

    #[tokio::test]
    async fn ranges_of_a_used_grade_cannot_be_deleted() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let ranges = grade_range::Model::for_grade(&db, &fx.grade.id).await.unwrap();
        let err = delete_range(&db, &ranges[0].id).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }
}
