use axum::extract::{Path, State};
use axum::Json;

use super::{run_with_deadline, ApiError};
use crate::models::{RankedRepository, RepositoryId, ToggleResponse};
use crate::state::AppState;

/// GET /api/github/favorites - Resolve all favorites upstream
pub async fn list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedRepository>>, ApiError> {
    let service = state.service.clone();

    let results = run_with_deadline(state.config.request_timeout(), |cancel| async move {
        service.list_favorites(&cancel).await
    })
    .await?;

    Ok(Json(results))
}

/// POST /api/github/favorites/:id - Add or remove a favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<RepositoryId>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let service = state.service.clone();

    let is_favorite = run_with_deadline(state.config.request_timeout(), |cancel| async move {
        service.toggle_favorite(id, &cancel).await
    })
    .await?;

    Ok(Json(ToggleResponse { id, is_favorite }))
}
