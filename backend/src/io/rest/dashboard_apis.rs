//! # REST API for the Dashboard
//!
//! One endpoint returning every derived view model for a selected month.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;
use shared::{DashboardResponse, MonthRef};

use crate::domain::reporting::TOP_TRANSACTIONS;
use crate::AppState;

/// Month selection, defaulting to the current calendar month
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl MonthQuery {
    pub fn month_ref(&self) -> MonthRef {
        let default = MonthRef::default();
        MonthRef {
            month: self.month.unwrap_or(default.month),
            year: self.year.unwrap_or(default.year),
        }
    }
}

/// Compute all dashboard view models for the selected month
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - query: {:?}", query);
    let month = query.month_ref();
    if month.month < 1 || month.month > 12 {
        return (StatusCode::BAD_REQUEST, format!("Invalid month: {}", month.month))
            .into_response();
    }

    let transactions = match state.transaction_service.list_transactions().await {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load transactions: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading transactions")
                .into_response();
        }
    };

    let reporting = &state.reporting_service;
    let month_data = reporting.month_data(&transactions, month);

    let response = DashboardResponse {
        month,
        summary: reporting.month_summary(&month_data),
        daily_breakdown: reporting.daily_breakdown(&month_data),
        category_breakdown: reporting.category_breakdown(&month_data),
        monthly_trend: reporting.monthly_trend(&transactions, month),
        comparison: reporting.last_month_comparison(&transactions, month),
        top_transactions: reporting.top_transactions(&month_data, TOP_TRANSACTIONS),
        interesting_dates: reporting.interesting_dates(&month_data),
    };

    (StatusCode::OK, Json(response)).into_response()
}
