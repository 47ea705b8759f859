use chrono::Utc;
use db::models::{
    assessment,
    file::{self, FileSummary},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel};
use tracing::{info, warn};
use util::{object_id, paths};

use crate::course_service;
use crate::error::{ServiceError, ServiceResult};
use crate::text_extract::extract_text;
use crate::validation::{ensure_id, required};

/// A received upload: the client's file name and raw bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

fn summary(model: &file::Model) -> FileSummary {
    FileSummary {
        id: model.id.clone(),
        course_id: model.course_id.clone(),
        title: model.title.clone(),
        file_name: model.file_name.clone(),
        original_name: model.original_name.clone(),
        uploaded_at: model.uploaded_at,
        updated_at: model.updated_at,
    }
}

/// Extracts text and writes the blob. Returns `(stored_name, text)`.
async fn store(upload: &Upload) -> ServiceResult<(String, String)> {
    let original = upload.original_name.trim();
    if original.is_empty() {
        return Err(ServiceError::bad_request("A file is required."));
    }
    let text = extract_text(original, &upload.bytes)?;
    paths::ensure_dir(paths::storage_root())?;
    let stored = paths::upload_file_name(original, Utc::now().timestamp_millis());
    tokio::fs::write(paths::upload_path(&stored), &upload.bytes).await?;
    Ok((stored, text))
}

async fn remove_blob(stored_name: &str) {
    if let Err(err) = tokio::fs::remove_file(paths::upload_path(stored_name)).await {
        warn!(file = %stored_name, error = %err, "could not remove uploaded blob");
    }
}

pub async fn find(db: &DatabaseConnection, file_id: &str) -> ServiceResult<file::Model> {
    ensure_id(file_id, "file_id")?;
    file::Model::find_by_id(db, file_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("File not found."))
}

pub async fn upload_file(
    db: &DatabaseConnection,
    course_id: &str,
    title: Option<&str>,
    upload: Upload,
) -> ServiceResult<FileSummary> {
    let course = course_service::find(db, course_id).await?;
    let title = required(title, "Title")?;
    let (stored, content) = store(&upload).await?;

    let now = Utc::now();
    let inserted = file::ActiveModel {
        id: Set(object_id::new_id()),
        course_id: Set(course.id),
        title: Set(title),
        file_name: Set(stored.clone()),
        original_name: Set(upload.original_name.trim().to_string()),
        content: Set(content),
        uploaded_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await;

    match inserted {
        Ok(model) => {
            info!(file_id = %model.id, course_id = %model.course_id, "file uploaded");
            Ok(summary(&model))
        }
        Err(err) => {
            remove_blob(&stored).await;
            Err(err.into())
        }
    }
}

pub async fn files_for_course(db: &DatabaseConnection, course_id: &str) -> ServiceResult<Vec<FileSummary>> {
    let course = course_service::find(db, course_id).await?;
    Ok(file::Model::summaries_for_course(db, &course.id).await?)
}

/// Replaces the title and/or the document of a file.
pub async fn replace_file(
    db: &DatabaseConnection,
    file_id: &str,
    title: Option<&str>,
    upload: Option<Upload>,
) -> ServiceResult<FileSummary> {
    let existing = find(db, file_id).await?;
    let old_blob = existing.file_name.clone();
    let mut active = existing.into_active_model();

    if let Some(t) = title {
        active.title = Set(required(Some(t), "Title")?);
    }
    let mut new_blob = None;
    if let Some(upload) = upload {
        let (stored, content) = store(&upload).await?;
        active.file_name = Set(stored.clone());
        active.original_name = Set(upload.original_name.trim().to_string());
        active.content = Set(content);
        new_blob = Some(stored);
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(model) => {
            if new_blob.is_some() {
                remove_blob(&old_blob).await;
            }
            Ok(summary(&model))
        }
        Err(err) => {
            if let Some(stored) = new_blob {
                remove_blob(&stored).await;
            }
            Err(err.into())
        }
    }
}

pub async fn delete_file(db: &DatabaseConnection, file_id: &str) -> ServiceResult<()> {
    let existing = find(db, file_id).await?;
    if assessment::Model::count_where(db, assessment::Column::FileId, file_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "File is used by an assessment and cannot be deleted.",
        ));
    }
    file::Entity::delete_by_id(existing.id.clone()).exec(db).await?;
    remove_blob(&existing.file_name).await;
    info!(file_id = %existing.id, "file deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_course;
    use crate::text_extract::docx_fixture;
    use db::test_utils::setup_test_db;
    use serial_test::serial;
    use util::test_helpers::setup_test_storage_root;

    fn docx(name: &str, text: &str) -> Upload {
        Upload {
            original_name: name.into(),
            bytes: docx_fixture(&[text]),
        }
    }

    #[tokio::test]
    #[serial]
    async fn upload_stores_blob_and_text() {
        let _tmp = setup_test_storage_root();
        let db = setup_test_db().await;
        let course = seed_course(&db, "BUS101").await;

        let saved = upload_file(&db, &course.id, Some("Paper 1"), docx("paper.docx", "Case study"))
            .await
            .unwrap();
        assert!(saved.file_name.ends_with("_paper.docx"));
        assert!(paths::upload_path(&saved.file_name).exists());

        let stored = find(&db, &saved.id).await.unwrap();
        assert_eq!(stored.content, "Case study");
        assert_eq!(files_for_course(&db, &course.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn pdf_and_missing_course_are_rejected() {
        let _tmp = setup_test_storage_root();
        let db = setup_test_db().await;
        let course = seed_course(&db, "BUS101").await;

        let pdf = Upload {
            original_name: "paper.pdf".into(),
            bytes: b"%PDF".to_vec(),
        };
        let err = upload_file(&db, &course.id, Some("P"), pdf).await.unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type");

        let err = upload_file(&db, "65f1a2b3c4d5e6f7a8b9c0d1", Some("P"), docx("a.docx", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    #[serial]
    async fn replace_swaps_the_blob_and_delete_removes_it() {
        let _tmp = setup_test_storage_root();
        let db = setup_test_db().await;
        let course = seed_course(&db, "BUS101").await;
        let first = upload_file(&db, &course.id, Some("P"), docx("one.docx", "first"))
            .await
            .unwrap();

        let replaced = replace_file(
            &db,
            &first.id,
            Some("Renamed"),
            Some(Upload {
                original_name: "two.txt".into(),
                bytes: b"second".to_vec(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(replaced.title, "Renamed");
        assert!(!paths::upload_path(&first.file_name).exists());
        assert_eq!(find(&db, &first.id).await.unwrap().content, "second");

        delete_file(&db, &first.id).await.unwrap();
        assert!(!paths::upload_path(&replaced.file_name).exists());
        assert!(matches!(find(&db, &first.id).await, Err(ServiceError::NotFound(_))));
    }
}
