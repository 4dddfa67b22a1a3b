//! Recurring-charge generator endpoint.
//!
//! The client calls this on each load of the financial view; the run is
//! idempotent, so repeated calls within a month create nothing new.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use tracing::info;

use crate::rest::mappers::generate_result_to_dto;
use crate::rest::{domain_error_response, require_user_id, AppState};

/// POST /api/recurring/generate
pub async fn generate_recurring(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!("POST /api/recurring/generate");

    let today = Local::now().date_naive();
    match state.recurring_service.generate_for_user(&user_id, today).await {
        Ok(result) => {
            info!(
                created = result.created.len(),
                failures = result.failures.len(),
                "Recurring generation finished"
            );
            (StatusCode::OK, Json(generate_result_to_dto(&result))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
