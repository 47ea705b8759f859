use axum::extract::{Path, State};
use services::ai_model_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// DELETE /api/ai-models/{model_id}
pub async fn delete_model(State(app_state): State<AppState>, Path(model_id): Path<String>) -> ApiResult {
    ai_model_service::delete_model(app_state.db(), &model_id).await?;
    Ok(ok((), "AI model deleted successfully"))
}
