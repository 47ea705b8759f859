use axum::extract::{Multipart, Path, State};
use services::file_service;
use util::state::AppState;

use super::common::FileForm;
use crate::response::{ApiResult, ok};

/// PUT /api/files/{file_id}
///
/// Multipart with optional `title` and `file`. A new document replaces the
/// stored blob and extracted text.
pub async fn replace_file(
    State(app_state): State<AppState>,
    Path(file_id): Path<String>,
    multipart: Multipart,
) -> ApiResult {
    let form = FileForm::read(multipart).await?;
    let file = file_service::replace_file(app_state.db(), &file_id, form.title.as_deref(), form.upload).await?;
    Ok(ok(file, "File updated successfully"))
}
