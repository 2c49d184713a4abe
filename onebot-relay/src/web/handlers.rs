//! Ingress endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::hook::{ConfigurableUi, Interceptor, MsgRecord};
use crate::onebot::OneBotHttpApi;

/// Header carrying the shared ingress token.
pub const AUTH_HEADER: &str = "x-relay-auth";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub interceptor: Arc<Interceptor>,
    pub relay: Arc<OneBotHttpApi>,
    pub auth_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        interceptor: Arc<Interceptor>,
        relay: Arc<OneBotHttpApi>,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            interceptor,
            relay,
            auth_token: auth_token.map(Arc::from),
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let provided = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());

        match (provided, self.auth_token.as_deref()) {
            (_, None) => Ok(()),
            (Some(provided), Some(expected)) if provided == expected => Ok(()),
            (None, Some(_)) => {
                warn!("ingress_auth_missing");
                Err(unauthorized())
            }
            (Some(_), Some(_)) => {
                warn!("ingress_auth_invalid");
                Err(unauthorized())
            }
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(EventResponse {
            status: "unauthorized",
            consumed: None,
        }),
    )
        .into_response()
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed: Option<bool>,
}

/// Dispatch one message record to every registered receiver.
///
/// Returns as soon as receivers have been offered the record; webhook
/// posts run in the background.
pub async fn receive_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(record): Json<MsgRecord>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    info!(
        msg_id = record.msg_id,
        peer_uin = %record.peer_uin,
        is_troop = record.is_troop,
        text_length = record.text.len(),
        "ingress_event_received"
    );

    let consumed = state.interceptor.dispatch(Some(&record));

    (
        StatusCode::OK,
        Json(EventResponse {
            status: "accepted",
            consumed: Some(consumed),
        }),
    )
        .into_response()
}

// =============================================================================
// Settings
// =============================================================================

/// The relay's destination URL together with its dialog text.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsView {
    pub title: String,
    pub message: String,
    pub hint: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub value: String,
}

pub async fn get_settings(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    Json(settings_view(&*state.relay)).into_response()
}

/// Store a new destination URL. An empty value disables the relay.
pub async fn put_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<SettingsUpdate>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    if let Err(e) = state.relay.apply_value(&update.value) {
        error!(error = %e, "settings_update_failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EventResponse {
                status: "error",
                consumed: None,
            }),
        )
            .into_response();
    }

    Json(settings_view(&*state.relay)).into_response()
}

fn settings_view(ui: &dyn ConfigurableUi) -> SettingsView {
    SettingsView {
        title: ui.title().to_string(),
        message: ui.message().to_string(),
        hint: ui.hint().to_string(),
        value: ui.current_value(),
    }
}
