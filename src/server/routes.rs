//! HTTP route handlers for the curator API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde::{Deserialize, Serialize};

use crate::runner::RunOutcome;
use crate::store::{PendingItem, StoreError};

use super::auth::require_access_key;
use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/urls", get(list_urls).post(add_url).delete(clear_urls))
        .route("/digest", post(run_digest))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_access_key,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "newsletter-curator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn store_error(e: &StoreError) -> (StatusCode, String) {
    let status = match e {
        StoreError::EmptyUrl | StoreError::InvalidEntry(_) => StatusCode::BAD_REQUEST,
        StoreError::Remote { .. } | StoreError::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, format!("Store error: {e}"))
}

/// Add-URL request.
#[derive(Debug, Deserialize)]
pub struct AddUrlRequest {
    /// URL or YouTube video identifier.
    pub url: String,
}

/// Pending-items listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Items in submission order.
    pub items: Vec<PendingItem>,
    /// Number of items.
    pub count: usize,
}

/// Clear response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    /// Number of items removed.
    pub removed: usize,
}

/// Queue a URL for the next digest.
async fn add_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddUrlRequest>,
) -> Result<(StatusCode, Json<PendingItem>), (StatusCode, String)> {
    let item = state
        .store
        .add(&request.url)
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(url = %item.url, "url queued");
    Ok((StatusCode::CREATED, Json(item)))
}

/// List queued URLs.
async fn list_urls(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse>, (StatusCode, String)> {
    let items = state.store.list().await.map_err(|e| store_error(&e))?;
    let count = items.len();
    Ok(Json(ListResponse { items, count }))
}

/// Remove every queued URL.
async fn clear_urls(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, (StatusCode, String)> {
    let removed = state.store.clear().await.map_err(|e| store_error(&e))?;
    tracing::info!(removed, "queue cleared");
    Ok(Json(ClearResponse { removed }))
}

/// Run the digest job now. Only one run at a time.
async fn run_digest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RunOutcome>, (StatusCode, String)> {
    let Ok(_guard) = state.run_lock.try_lock() else {
        return Err((
            StatusCode::CONFLICT,
            "A digest run is already in progress".to_string(),
        ));
    };

    let today = chrono::Local::now().date_naive();
    let outcome = state
        .runner
        .run(today)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Digest error: {e}")))?;
    Ok(Json(outcome))
}
