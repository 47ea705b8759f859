use axum::extract::{Multipart, State};
use services::file_service;
use util::state::AppState;

use super::common::FileForm;
use crate::response::{ApiError, ApiResult, created};

/// POST /api/files
///
/// ### Form fields
/// - `course_id` (required)
/// - `title` (required)
/// - `file` (required): `.docx`, `.txt` or `.md`
///
/// The blob is written under the storage root and its text extracted for
/// assessment generation.
///
/// ### Errors
/// - `400` for a missing field, an unsupported type or a document without text
/// - `404` when the course does not exist
pub async fn upload_file(State(app_state): State<AppState>, multipart: Multipart) -> ApiResult {
    let form = FileForm::read(multipart).await?;
    let course_id = form
        .course_id
        .ok_or_else(|| ApiError::bad_request("Missing required field: course_id"))?;
    let upload = form
        .upload
        .ok_or_else(|| ApiError::bad_request("Missing file upload"))?;

    let file = file_service::upload_file(app_state.db(), &course_id, form.title.as_deref(), upload).await?;
    Ok(created(file, "File uploaded successfully"))
}
