use axum::{Json, extract::State};
use services::ai_model_service::{self, AiModelInput};
use util::state::AppState;

use crate::response::{ApiResult, created};

/// POST /api/ai-models
///
/// ### Request Body
/// ```json
/// {
///   "name": "Ensemble",
///   "provider": "openai",
///   "first_model": "gpt-4o",
///   "second_model": "gpt-4o-mini",
///   "first_weight": 70,
///   "second_weight": 30
/// }
/// ```
///
/// `400` when a field is missing or the weights do not sum to 100.
pub async fn create_model(State(app_state): State<AppState>, Json(req): Json<AiModelInput>) -> ApiResult {
    let model = ai_model_service::create_model(app_state.db(), req).await?;
    Ok(created(model, "AI model created successfully"))
}
