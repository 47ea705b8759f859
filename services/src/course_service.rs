use chrono::Utc;
use db::models::{assessment, course, enrollment, file, grade, user};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use util::{object_id, paths};

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{ensure_id, parse_date, required};

/// Create and update payload. Every field is optional so that partial updates
/// and missing-field errors share one shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub live_assessment_available: Option<bool>,
    pub grade_id: Option<String>,
    pub total_marks: Option<f64>,
}

/// A course with its derived enrollment.
#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    #[serde(flatten)]
    pub course: course::Model,
    pub total_enrollment: u64,
}

pub async fn view(db: &DatabaseConnection, course: course::Model) -> ServiceResult<CourseView> {
    let total_enrollment = enrollment::Model::count_learners(db, &course.code).await?;
    Ok(CourseView {
        course,
        total_enrollment,
    })
}

pub async fn views(db: &DatabaseConnection, courses: Vec<course::Model>) -> ServiceResult<Vec<CourseView>> {
    let mut out = Vec::with_capacity(courses.len());
    for c in courses {
        out.push(view(db, c).await?);
    }
    Ok(out)
}

async fn check_grade(db: &DatabaseConnection, grade_id: &str) -> ServiceResult<()> {
    ensure_id(grade_id, "grade_id")?;
    if grade::Model::find_by_id(db, grade_id).await?.is_none() {
        return Err(ServiceError::not_found("Grade not found."));
    }
    Ok(())
}

pub async fn find(db: &DatabaseConnection, course_id: &str) -> ServiceResult<course::Model> {
    ensure_id(course_id, "course_id")?;
    course::Model::find_by_id(db, course_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Course not found."))
}

pub async fn create_course(db: &DatabaseConnection, input: CourseInput) -> ServiceResult<CourseView> {
    let name = required(input.name.as_deref(), "Name")?;
    let code = required(input.code.as_deref(), "Code")?;
    let visibility = required(input.visibility.as_deref(), "Visibility")?;
    let start = parse_date(&required(input.start_date.as_deref(), "Start date")?, "start_date")?;
    let end = parse_date(&required(input.end_date.as_deref(), "End date")?, "end_date")?;
    if start > end {
        return Err(ServiceError::bad_request("Start date must not be after end date."));
    }
    if let Some(grade_id) = input.grade_id.as_deref() {
        check_grade(db, grade_id).await?;
    }
    if course::Model::find_by_code(db, &code).await?.is_some() {
        return Err(ServiceError::Conflict("Course code already exists.".into()));
    }

    let now = Utc::now();
    let created = course::ActiveModel {
        id: Set(object_id::new_id()),
        name: Set(name),
        code: Set(code),
        description: Set(input.description),
        visibility: Set(visibility),
        start_date: Set(start),
        end_date: Set(end),
        live_assessment_available: Set(input.live_assessment_available.unwrap_or(false)),
        grade_id: Set(input.grade_id),
        total_marks: Set(input.total_marks),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(course_id = %created.id, code = %created.code, "course created");
    view(db, created).await
}

pub async fn list_courses(db: &DatabaseConnection) -> ServiceResult<Vec<CourseView>> {
    views(db, course::Model::list_all(db).await?).await
}

pub async fn get_course(db: &DatabaseConnection, course_id: &str) -> ServiceResult<CourseView> {
    let c = find(db, course_id).await?;
    view(db, c).await
}

/// Courses whose codes `user_id` is bound to.
pub async fn courses_for_user(db: &DatabaseConnection, user_id: &str) -> ServiceResult<Vec<CourseView>> {
    ensure_id(user_id, "user_id")?;
    if user::Model::find_by_id(db, user_id).await?.is_none() {
        return Err(ServiceError::not_found("User not found."));
    }
    let codes = enrollment::Model::codes_for_user(db, user_id).await?;
    views(db, course::Model::find_by_codes(db, &codes).await?).await
}

/// Partial update. A code change is carried over to every enrollment.
pub async fn update_course(db: &DatabaseConnection, course_id: &str, input: CourseInput) -> ServiceResult<CourseView> {
    let existing = find(db, course_id).await?;
    let old_code = existing.code.clone();

    let start = match input.start_date.as_deref() {
        Some(raw) => parse_date(raw, "start_date")?,
        None => existing.start_date,
    };
    let end = match input.end_date.as_deref() {
        Some(raw) => parse_date(raw, "end_date")?,
        None => existing.end_date,
    };
    if start > end {
        return Err(ServiceError::bad_request("Start date must not be after end date."));
    }

    let code = match input.code.as_deref() {
        Some(raw) => required(Some(raw), "Code")?,
        None => old_code.clone(),
    };
    if code != old_code {
        if let Some(other) = course::Model::find_by_code(db, &code).await? {
            if other.id != existing.id {
                return Err(ServiceError::Conflict("Course code already exists.".into()));
            }
        }
    }
    if let Some(grade_id) = input.grade_id.as_deref() {
        check_grade(db, grade_id).await?;
    }

    let mut active = existing.into_active_model();
    if let Some(name) = input.name.as_deref() {
        active.name = Set(required(Some(name), "Name")?);
    }
    if let Some(visibility) = input.visibility.as_deref() {
        active.visibility = Set(required(Some(visibility), "Visibility")?);
    }
    if input.description.is_some() {
        active.description = Set(input.description);
    }
    if let Some(live) = input.live_assessment_available {
        active.live_assessment_available = Set(live);
    }
    if input.grade_id.is_some() {
        active.grade_id = Set(input.grade_id);
    }
    if input.total_marks.is_some() {
        active.total_marks = Set(input.total_marks);
    }
    active.code = Set(code.clone());
    active.start_date = Set(start);
    active.end_date = Set(end);
    active.updated_at = Set(Utc::now());

    let txn = db.begin().await?;
    let updated = active.update(&txn).await?;
    if code != old_code {
        enrollment::Model::rename_code(&txn, &old_code, &code).await?;
    }
    txn.commit().await?;

    view(db, updated).await
}

/// Deletes a course with no assessments, together with its files and enrollments.
pub async fn delete_course(db: &DatabaseConnection, course_id: &str) -> ServiceResult<()> {
    let existing = find(db, course_id).await?;
    if assessment::Model::count_where(db, assessment::Column::CourseId, course_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "Course has assessments and cannot be deleted.",
        ));
    }
    let files = file::Model::for_course(db, course_id).await?;

    let txn = db.begin().await?;
    enrollment::Model::remove_code(&txn, &existing.code).await?;
    course::Entity::delete_by_id(existing.id.clone()).exec(&txn).await?;
    txn.commit().await?;

    for f in files {
        if let Err(err) = tokio::fs::remove_file(paths::upload_path(&f.file_name)).await {
            warn!(file = %f.file_name, error = %err, "could not remove uploaded blob");
        }
    }
    info!(course_id = %existing.id, "course deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_assessment_fixture, seed_learner};
    use db::test_utils::setup_test_db;

    fn input(code: &str) -> CourseInput {
        CourseInput {
            name: Some("Business Management".into()),
            code: Some(code.into()),
            visibility: Some("public".into()),
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-12-31".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected_without_a_second_record() {
        let db = setup_test_db().await;
        create_course(&db, input("BUS101")).await.unwrap();
        let err = create_course(&db, input("BUS101")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(list_courses(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_fields_and_bad_dates() {
        let db = setup_test_db().await;
        let mut no_name = input("A1");
        no_name.name = None;
        assert_eq!(
            create_course(&db, no_name).await.unwrap_err().to_string(),
            "Name is required."
        );

        let mut backwards = input("A1");
        backwards.start_date = Some("2026-01-01".into());
        assert!(matches!(create_course(&db, backwards).await, Err(ServiceError::BadRequest(_))));

        let mut same_day = input("A1");
        same_day.end_date = Some("2025-01-01".into());
        assert!(create_course(&db, same_day).await.is_ok());
    }

    #[tokio::test]
    async fn enrollment_is_derived_from_learner_bindings() {
        let db = setup_test_db().await;
        let c = create_course(&db, input("BUS101")).await.unwrap();
        assert_eq!(c.total_enrollment, 0);

        seed_learner(&db, "a@x.com", &["BUS101"]).await;
        seed_learner(&db, "b@x.com", &["BUS101"]).await;
        assert_eq!(get_course(&db, &c.course.id).await.unwrap().total_enrollment, 2);
    }

    #[tokio::test]
    async fn code_change_follows_enrollments() {
        let db = setup_test_db().await;
        let c = create_course(&db, input("BUS101")).await.unwrap();
        let other = create_course(&db, input("ECO200")).await.unwrap();
        let learner = seed_learner(&db, "a@x.com", &["BUS101"]).await;

        let clash = update_course(
            &db,
            &c.course.id,
            CourseInput {
                code: Some("ECO200".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(clash, ServiceError::Conflict(_)));

        let renamed = update_course(
            &db,
            &c.course.id,
            CourseInput {
                code: Some("BUS102".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.course.code, "BUS102");
        assert_eq!(renamed.total_enrollment, 1);
        assert_eq!(
            enrollment::Model::codes_for_user(&db, &learner.id).await.unwrap(),
            vec!["BUS102".to_string()]
        );
        assert_eq!(get_course(&db, &other.course.id).await.unwrap().total_enrollment, 0);
    }

    #[tokio::test]
    async fn delete_refuses_courses_with_assessments() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let err = delete_course(&db, &fx.course.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));

        let empty = create_course(&db, input("EMPTY1")).await.unwrap();
        delete_course(&db, &empty.course.id).await.unwrap();
        assert!(matches!(
            get_course(&db, &empty.course.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
