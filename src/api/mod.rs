//! Axum HTTP surface under `/api/github`.

pub mod favorites;
pub mod repos;

use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::service::ServiceError;
use crate::state::AppState;

pub type ApiError = (StatusCode, String);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/api/github/favorites") }))
        .route("/api/github/search", get(repos::search))
        .route("/api/github/relevance", get(repos::relevance))
        .route("/api/github/repositories/{id}", get(repos::get_repository))
        .route("/api/github/favorites", get(favorites::list_favorites))
        .route("/api/github/favorites/{id}", post(favorites::toggle_favorite))
        .with_state(state)
}

/// Run one service call under a fresh cancellation token. The token is
/// cancelled when the deadline passes or when the handler future is dropped
/// (client went away), which aborts any in-flight upstream fetches.
pub(crate) async fn run_with_deadline<T, F, Fut>(timeout: Duration, op: F) -> Result<T, ApiError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match tokio::time::timeout(timeout, op(cancel.clone())).await {
        Ok(result) => result.map_err(service_error),
        Err(_) => {
            cancel.cancel();
            tracing::warn!("Request exceeded its {}s deadline", timeout.as_secs());
            Err((
                StatusCode::GATEWAY_TIMEOUT,
                "Upstream request timed out".to_string(),
            ))
        }
    }
}

fn service_error(e: ServiceError) -> ApiError {
    match e {
        ServiceError::EmptyQuery => (
            StatusCode::BAD_REQUEST,
            "Query 'repositoryName' is required.".to_string(),
        ),
        // 499 "client closed request": only reachable when the token was
        // cancelled without the deadline firing.
        ServiceError::Cancelled => (
            StatusCode::from_u16(499).unwrap_or(StatusCode::REQUEST_TIMEOUT),
            "Request cancelled".to_string(),
        ),
    }
}
