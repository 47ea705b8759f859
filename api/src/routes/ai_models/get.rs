use axum::extract::{Path, State};
use services::ai_model_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /api/ai-models
pub async fn list_models(State(app_state): State<AppState>) -> ApiResult {
    let models = ai_model_service::list_models(app_state.db()).await?;
    Ok(ok(models, "AI models retrieved successfully"))
}

/// GET /api/ai-models/{model_id}
pub async fn get_model(State(app_state): State<AppState>, Path(model_id): Path<String>) -> ApiResult {
    let model = ai_model_service::find(app_state.db(), &model_id).await?;
    Ok(ok(model, "AI model retrieved successfully"))
}
