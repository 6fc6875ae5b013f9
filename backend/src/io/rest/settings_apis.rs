//! # REST API for Settings
//!
//! Endpoints for the monthly goal and favorite templates.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use shared::{Favorite, FavoritesResponse, MonthlyGoalResponse, SetMonthlyGoalRequest};

use crate::AppState;

/// Get the monthly profit goal
pub async fn get_monthly_goal(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings/goal");

    match state.settings_service.monthly_goal().await {
        Ok(monthly_goal) => {
            (StatusCode::OK, Json(MonthlyGoalResponse { monthly_goal })).into_response()
        }
        Err(e) => {
            error!("Failed to read monthly goal: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading monthly goal").into_response()
        }
    }
}

/// Set the monthly profit goal
pub async fn set_monthly_goal(
    State(state): State<AppState>,
    Json(request): Json<SetMonthlyGoalRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/goal - request: {:?}", request);

    match state.settings_service.set_monthly_goal(request.monthly_goal).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set monthly goal: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// List the favorite templates
pub async fn list_favorites(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings/favorites");

    match state.settings_service.favorites().await {
        Ok(favorites) => (StatusCode::OK, Json(FavoritesResponse { favorites })).into_response(),
        Err(e) => {
            error!("Failed to list favorites: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing favorites").into_response()
        }
    }
}

/// Add or remove a favorite template
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(favorite): Json<Favorite>,
) -> impl IntoResponse {
    info!("POST /api/settings/favorites/toggle - favorite: {:?}", favorite);

    match state.settings_service.toggle_favorite(favorite).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to toggle favorite: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
