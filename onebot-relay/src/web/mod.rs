//! Ingress server feeding message records into the interception layer.
//!
//! This module provides a small HTTP surface that:
//! - Accepts message records as JSON and dispatches them to receivers
//! - Reads and updates the relay's destination URL
//! - Optionally checks a shared token on every request but `/health`

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    get_settings, health, put_settings, receive_event, AppState, EventResponse,
    HealthResponse, SettingsUpdate, SettingsView, AUTH_HEADER,
};

/// Build the ingress router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", post(receive_event))
        .route("/settings/url", get(get_settings).put(put_settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
