use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use services::assessment_service;
use util::state::AppState;

use crate::response::{ApiResult, ok};

#[derive(Debug, Deserialize)]
pub struct TemperatureRequest {
    pub temperature: f64,
}

/// PUT /api/assessments/questions/{question_id}/temperature
///
/// `{ "temperature": 0.3 }`; accepted range is 0 to 2.
pub async fn set_temperature(
    State(app_state): State<AppState>,
    Path(question_id): Path<String>,
    Json(req): Json<TemperatureRequest>,
) -> ApiResult {
    let question = assessment_service::set_temperature(app_state.db(), &question_id, req.temperature).await?;
    Ok(ok(question, "Temperature updated successfully"))
}
