use axum::{
    Json,
    extract::{Path, State},
};
use services::ai_model_service::{self, AiModelInput};
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// PUT /api/ai-models/{model_id}
pub async fn update_model(
    State(app_state): State<AppState>,
    Path(model_id): Path<String>,
    Json(req): Json<AiModelInput>,
) -> ApiResult {
    let model = ai_model_service::update_model(app_state.db(), &model_id, req).await?;
    Ok(ok(model, "AI model updated successfully"))
}
