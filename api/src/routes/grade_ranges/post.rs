use axum::{Json, extract::State};
use services::grade_range_service::{self, RangeInput};
use util::state::AppState;

use crate::response::{ApiResult, created};

/// POST /api/grade-ranges
///
/// ### Request Body
/// ```json
/// { "grade_id": "...", "label": "competent", "start_range": 50, "end_range": 100 }
/// ```
///
/// Marks the parent grade configured.
///
/// ### Errors
/// - `400` for an unknown label, a negative start, `start == end` or `start > end`
/// - `404` when the grade does not exist
pub async fn create_range(State(app_state): State<AppState>, Json(req): Json<RangeInput>) -> ApiResult {
    let range = grade_range_service::create_range(app_state.db(), req).await?;
    Ok(created(range, "Grade range created successfully"))
}
