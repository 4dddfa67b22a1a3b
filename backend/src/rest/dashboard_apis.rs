//! Dashboard endpoint.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use tracing::info;

use crate::rest::{domain_error_response, require_user_id, AppState};

/// GET /api/dashboard/summary
pub async fn monthly_summary(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!("GET /api/dashboard/summary");

    let today = Local::now().date_naive();
    match state.transaction_service.monthly_summary(&user_id, today).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(shared::MonthlySummary {
                month: summary.month,
                year: summary.year,
                total_income: summary.total_income,
                total_expenses: summary.total_expenses,
                balance: summary.balance,
                pending_count: summary.pending_count,
                overdue_count: summary.overdue_count,
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
