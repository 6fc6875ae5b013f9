//! # Shop Books Backend
//!
//! Single-user income/expense tracker for a small shop. This crate is the
//! non-UI half of the application and follows a layered architecture:
//!
//! ```text
//! Presentation layer (out of scope)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (reporting, transactions, settings, session lock, export)
//!     ↓
//! Storage Layer (per-user CSV/YAML files)
//! ```
//!
//! The backend is UI-agnostic: any client that speaks the REST surface can
//! render the dashboard, drive the PIN lock, and manage transactions.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    ExportService, ReportingService, SessionLockService, SettingsService, TransactionService,
};
use crate::io::rest::{
    dashboard_apis, export_apis, session_apis, settings_apis, transaction_apis,
};
use crate::storage::FileConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService,
    pub reporting_service: ReportingService,
    pub settings_service: SettingsService,
    pub session_lock: SessionLockService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services.
///
/// `base_directory` overrides the default data directory
/// (`~/Documents/Shop Books`); `username` selects the per-user data files
/// and the PIN the session lock verifies against.
pub async fn initialize_backend(
    base_directory: Option<PathBuf>,
    username: &str,
) -> Result<AppState> {
    info!("Setting up storage");
    let connection = Arc::new(match base_directory {
        Some(dir) => FileConnection::new(dir)?,
        None => FileConnection::new_default()?,
    });

    info!("Setting up domain services for '{}'", username);
    let settings_service = SettingsService::new(connection.clone(), username);
    let transaction_service =
        TransactionService::new(connection.clone(), username, settings_service.clone());
    let session_lock =
        SessionLockService::new(connection, username, SessionLockService::epoch_millis()?).await?;

    Ok(AppState {
        transaction_service,
        reporting_service: ReportingService::new(),
        settings_service,
        session_lock,
        export_service: ExportService::new(),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/transactions",
            get(transaction_apis::list_transactions)
                .post(transaction_apis::create_transaction)
                .put(transaction_apis::update_transaction),
        )
        .route("/transactions/:id", delete(transaction_apis::delete_transaction))
        .route("/transactions/:id/undo", post(transaction_apis::undo_delete))
        .route("/dashboard", get(dashboard_apis::get_dashboard))
        .route(
            "/settings/goal",
            get(settings_apis::get_monthly_goal).put(settings_apis::set_monthly_goal),
        )
        .route("/settings/favorites", get(settings_apis::list_favorites))
        .route("/settings/favorites/toggle", post(settings_apis::toggle_favorite))
        .route("/session/status", get(session_apis::get_status))
        .route("/session/activity", post(session_apis::record_activity))
        .route("/session/pin", post(session_apis::submit_pin))
        .route("/session/pin/reset", post(session_apis::reset_pin))
        .route("/session/pin/change", post(session_apis::change_pin))
        .route("/export/tsv", get(export_apis::export_tsv))
        .route("/export/print", get(export_apis::export_print));

    Router::new().nest("/api", api_routes).layer(cors).with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_initialize_backend_and_serve_status() {
        let dir = TempDir::new().unwrap();
        let app_state = initialize_backend(Some(dir.path().to_path_buf()), "somchai")
            .await
            .unwrap();

        // Fresh user: locked in set mode
        let status = app_state.session_lock.status();
        assert!(status.locked);

        let router = create_router(app_state);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/session/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let status: shared::LockStatusResponse = serde_json::from_slice(&body).unwrap();
        assert!(status.locked);
        assert_eq!(status.mode, Some(shared::PinMode::Set));
    }

    #[tokio::test]
    async fn test_dashboard_rejects_invalid_month() {
        let dir = TempDir::new().unwrap();
        let app_state = initialize_backend(Some(dir.path().to_path_buf()), "somchai")
            .await
            .unwrap();

        let router = create_router(app_state);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard?month=13&year=2024")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
