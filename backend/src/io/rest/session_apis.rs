//! # REST API for the Session Lock
//!
//! Endpoints the presentation layer uses to drive the PIN lock machine:
//! status, activity pings, PIN submission, destructive reset, and the
//! change-PIN flow.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use shared::{ResetPinRequest, SubmitPinRequest};

use crate::domain::session_lock::SessionLockService;
use crate::AppState;

fn now_or_error() -> Result<u64, axum::response::Response> {
    SessionLockService::epoch_millis().map_err(|e| {
        error!("Clock error: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Clock error").into_response()
    })
}

/// Current lock status
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.session_lock.status())).into_response()
}

/// Record user activity (pointer move, key press, click, touch)
pub async fn record_activity(State(state): State<AppState>) -> impl IntoResponse {
    let now = match now_or_error() {
        Ok(now) => now,
        Err(response) => return response,
    };
    state.session_lock.record_activity(now);
    (StatusCode::OK, Json(state.session_lock.status())).into_response()
}

/// Submit a 6-digit PIN in the current locked sub-mode
pub async fn submit_pin(
    State(state): State<AppState>,
    Json(request): Json<SubmitPinRequest>,
) -> impl IntoResponse {
    info!("POST /api/session/pin");
    let now = match now_or_error() {
        Ok(now) => now,
        Err(response) => return response,
    };

    match state.session_lock.submit_pin(&request.pin, now).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("PIN submission failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error processing PIN").into_response()
        }
    }
}

/// Destructive PIN reset; requires explicit confirmation
pub async fn reset_pin(
    State(state): State<AppState>,
    Json(request): Json<ResetPinRequest>,
) -> impl IntoResponse {
    info!("POST /api/session/pin/reset - confirmed: {}", request.confirm);

    match state.session_lock.reset_pin(request.confirm).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => {
            error!("PIN reset rejected: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Begin a change-PIN flow (verify the current PIN, then set a new one)
pub async fn change_pin(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/session/pin/change");

    match state.session_lock.begin_change_pin().await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => {
            error!("Change PIN rejected: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
