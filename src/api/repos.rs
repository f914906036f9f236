use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::{run_with_deadline, ApiError};
use crate::models::{RankedRepository, RepositoryId, RepositoryQuery};
use crate::state::AppState;

/// GET /api/github/search?repositoryName= - Search repositories by name
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<RepositoryQuery>,
) -> Result<Json<Vec<RankedRepository>>, ApiError> {
    let query = params.repository_name.unwrap_or_default();
    let service = state.service.clone();

    let results = run_with_deadline(state.config.request_timeout(), |cancel| async move {
        service.search(&query, &cancel).await
    })
    .await?;

    Ok(Json(results))
}

/// GET /api/github/relevance?repositoryName= - Search results, or favorites
/// when no name is given, ordered by descending relevance
pub async fn relevance(
    State(state): State<AppState>,
    Query(params): Query<RepositoryQuery>,
) -> Result<Json<Vec<RankedRepository>>, ApiError> {
    let service = state.service.clone();

    let results = run_with_deadline(state.config.request_timeout(), |cancel| async move {
        service
            .list_by_relevance(params.repository_name.as_deref(), &cancel)
            .await
    })
    .await?;

    Ok(Json(results))
}

/// GET /api/github/repositories/:id - Repository details
pub async fn get_repository(
    State(state): State<AppState>,
    Path(id): Path<RepositoryId>,
) -> Result<Json<RankedRepository>, ApiError> {
    let service = state.service.clone();

    let repo = run_with_deadline(state.config.request_timeout(), |cancel| async move {
        service.get_by_id(id, &cancel).await
    })
    .await?;

    repo.map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Repository {id} not found")))
}
