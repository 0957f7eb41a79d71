//! HTTP route handlers.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::display::{DisplayPayload, encode_or_error};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(display_payload))
        .route("/health", get(health))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Display payload for the configured address.
///
/// Failures are rendered as the ERROR payload with a 500 status, so the
/// display still has something to show.
async fn display_payload(State(state): State<AppState>) -> (StatusCode, Json<DisplayPayload>) {
    let address = state.address.to_string();

    if let Some(cached) = state.payloads.get(&address).await {
        return (StatusCode::OK, Json(cached.as_ref().clone()));
    }

    let report = state.locator.report(&address).await;
    let payload = encode_or_error(&report);

    if payload.is_error() {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload));
    }

    state
        .payloads
        .insert(address, Arc::new(payload.clone()))
        .await;

    (StatusCode::OK, Json(payload))
}
