use axum::extract::{Path, State};
use services::file_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/files/{file_id}
///
/// Removes the record and the stored blob. `400` while an assessment
/// references the file.
pub async fn delete_file(State(app_state): State<AppState>, Path(file_id): Path<String>) -> ApiResult {
    file_service::delete_file(app_state.db(), &file_id).await?;
    Ok(ok((), "File deleted successfully"))
}
