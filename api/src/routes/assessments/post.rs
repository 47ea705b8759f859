use axum::{Json, extract::State};
use services::assessment_service::{self, CreateAssessment};
use util::state::AppState;

use crate::response::{ApiResult, created};

/// POST /api/assessments
///
/// Sends the file's extracted text to the AI service and stores the returned
/// metadata and questions. Generating again for the same course and file
/// updates that assessment and replaces its questions.
///
/// ### Request Body
/// ```json
/// {
///   "course_id": "...",
///   "assessment_name": "Case study 1",
///   "file_id": "...",
///   "grade_id": "...",
///   "ai_model_id": "..."
/// }
/// ```
///
/// ### Errors
/// - `400` for malformed ids, an unconfigured grade or incomplete extraction output
/// - `404` when a referenced record is missing
/// - `500` when the AI service fails after retries
pub async fn create_assessment(State(app_state): State<AppState>, Json(req): Json<CreateAssessment>) -> ApiResult {
    let detail = assessment_service::create_from_file(app_state.db(), app_state.ai(), req).await?;
    Ok(created(detail, "Assessment generated successfully"))
}
