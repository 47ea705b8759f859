use axum::{
    Json,
    extract::{Path, State},
};
use services::grade_range_service::{self, RangeInput};
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// PUT /api/grade-ranges/{range_id}
pub async fn update_range(
    State(app_state): State<AppState>,
    Path(range_id): Path<String>,
    Json(req): Json<RangeInput>,
) -> ApiResult {
    let range = grade_range_service::update_range(app_state.db(), &range_id, req).await?;
    Ok(ok(range, "Grade range updated successfully"))
}
