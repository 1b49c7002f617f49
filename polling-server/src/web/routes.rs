//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::directory::StationDirectory;
use crate::resolver::SearchOutcome;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<D>(state: AppState<D>) -> Router
where
    D: StationDirectory + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(search_station::<D>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find the polling station for a free-form address.
async fn search_station<D>(
    State(state): State<AppState<D>>,
    Query(req): Query<SearchRequest>,
) -> Result<Response, AppError>
where
    D: StationDirectory + 'static,
{
    let input = req.q.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err(AppError::BadRequest {
            message: "missing search text: pass ?q=<address>".to_string(),
        });
    }

    let outcome = state.resolver.resolve(input).await;

    let status = match &outcome {
        SearchOutcome::Found { .. } => StatusCode::OK,
        SearchOutcome::NotFound => StatusCode::NOT_FOUND,
        SearchOutcome::QueryFailed(_) => StatusCode::BAD_GATEWAY,
    };

    Ok((status, Json(SearchResponse::from_outcome(&outcome))).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        tracing::debug!(%status, %message, "rejecting request");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
