//! # REST API for Transactions
//!
//! Endpoints for listing, creating, updating and deleting transactions.
//! Deletes are staged with an undo grace window; the destructive store
//! write happens in a delayed background task unless undone first.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;
use shared::{
    CreateTransactionRequest, PeriodFilter, SortBy, TransactionFilter, TransactionListResponse,
    TypeFilter, UpdateTransactionRequest,
};
use std::time::Duration;

use crate::domain::session_lock::SessionLockService;
use crate::domain::transaction_service::UNDO_GRACE_MILLIS;
use crate::AppState;

// Query parameters for transaction listing API
#[derive(Debug, Deserialize)]
pub struct TransactionListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<TypeFilter>,
    pub period: Option<PeriodFilter>,
    pub sort: Option<SortBy>,
}

/// List transactions with optional search/type/period filters and sorting
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let filter = TransactionFilter {
        search_term: query.search.unwrap_or_default(),
        type_filter: query.type_filter.unwrap_or_default(),
        period_filter: query.period.unwrap_or_default(),
        sort_by: query.sort.unwrap_or_default(),
    };

    match state.transaction_service.list_filtered(&filter).await {
        Ok(transactions) => {
            (StatusCode::OK, Json(TransactionListResponse { transactions })).into_response()
        }
        Err(e) => {
            error!("Failed to list transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing transactions").into_response()
        }
    }
}

/// Create a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    match state.transaction_service.create_transaction(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create transaction: {}", e);
            (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": e.to_string() })))
                .into_response()
        }
    }
}

/// Update an existing transaction
pub async fn update_transaction(
    State(state): State<AppState>,
    Json(request): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/transactions - request: {:?}", request);

    match state.transaction_service.update_transaction(request).await {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(e) => {
            error!("Failed to update transaction: {}", e);
            (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": e.to_string() })))
                .into_response()
        }
    }
}

/// Stage a transaction delete with an undo grace window
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", transaction_id);

    let now_millis = match SessionLockService::epoch_millis() {
        Ok(now) => now,
        Err(e) => {
            error!("Clock error: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Clock error").into_response();
        }
    };

    match state
        .transaction_service
        .delete_transaction(&transaction_id, now_millis)
        .await
    {
        Ok(response) => {
            // Commit once the grace window has elapsed, unless undone
            let service = state.transaction_service.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(UNDO_GRACE_MILLIS + 200)).await;
                if let Ok(now) = SessionLockService::epoch_millis() {
                    if let Err(e) = service.commit_due_deletes(now).await {
                        error!("Failed to commit staged deletes: {}", e);
                    }
                }
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to delete transaction: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

/// Undo a staged delete within its grace window
pub async fn undo_delete(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/transactions/{}/undo", transaction_id);

    match state.transaction_service.undo_delete(&transaction_id) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to undo delete: {}", e);
            (StatusCode::GONE, e.to_string()).into_response()
        }
    }
}
