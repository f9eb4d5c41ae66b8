//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::engine::Recommendations;
use crate::matching::service::{preview_for_skill_names, recommend_for_student, PreviewResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub skills: Vec<String>,
}

/// GET /api/v1/recommendations/for-student/me
///
/// Ranked opportunities and learning paths for the calling student.
pub async fn handle_student_recommendations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Recommendations>, AppError> {
    let result =
        recommend_for_student(state.snapshots.as_ref(), params.user_id, &state.engine).await?;
    Ok(Json(result))
}

/// POST /api/v1/recommendations/preview
///
/// What-if recommendations for a list of skill names. Unknown names are
/// echoed back in `unresolved_skills`.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResult>, AppError> {
    let result =
        preview_for_skill_names(state.snapshots.as_ref(), &request.skills, &state.engine).await?;
    Ok(Json(result))
}
