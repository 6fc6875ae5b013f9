//! # REST API for Data Export
//!
//! Endpoints for the tab-separated month report and the print-formatted
//! HTML report, both derived from the selected month's data and summary.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use log::{error, info};

use super::dashboard_apis::MonthQuery;
use crate::AppState;

/// Export the selected month as a tab-separated report file
pub async fn export_tsv(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/export/tsv - query: {:?}", query);
    let month = query.month_ref();

    let transactions = match state.transaction_service.list_transactions().await {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load transactions for export: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading transactions")
                .into_response();
        }
    };

    let month_data = state.reporting_service.month_data(&transactions, month);
    let summary = state.reporting_service.month_summary(&month_data);
    let file = state.export_service.tsv_report(month, &month_data, &summary);

    (StatusCode::OK, Json(file)).into_response()
}

/// Render the selected month as a print-formatted HTML report
pub async fn export_print(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/export/print - query: {:?}", query);
    let month = query.month_ref();

    let transactions = match state.transaction_service.list_transactions().await {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load transactions for print: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading transactions")
                .into_response();
        }
    };

    let month_data = state.reporting_service.month_data(&transactions, month);
    let summary = state.reporting_service.month_summary(&month_data);
    let html = state.export_service.print_report(month, &month_data, &summary);

    Html(html).into_response()
}
