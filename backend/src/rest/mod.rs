//! REST surface of the backend.
//!
//! Handlers map the public DTOs from `shared` to domain commands, invoke the
//! services and translate `DomainError` variants into HTTP status codes.
//! Authentication is delegated: the authenticated principal arrives as the
//! opaque `X-User-Id` header, set by the fronting auth layer.

pub mod contact_apis;
pub mod dashboard_apis;
pub mod mappers;
pub mod recurring_apis;
pub mod transaction_apis;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tracing::error;

use crate::domain::errors::DomainError;
use crate::domain::{ContactService, RecurringChargeService, TransactionService};

const USER_ID_HEADER: &str = "x-user-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
    pub transaction_service: TransactionService,
    pub recurring_service: RecurringChargeService,
}

impl AppState {
    pub fn new(
        contact_service: ContactService,
        transaction_service: TransactionService,
        recurring_service: RecurringChargeService,
    ) -> Self {
        Self {
            contact_service,
            transaction_service,
            recurring_service,
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/contacts",
            get(contact_apis::list_contacts).post(contact_apis::create_contact),
        )
        .route(
            "/api/contacts/:id",
            put(contact_apis::update_contact).delete(contact_apis::delete_contact),
        )
        .route(
            "/api/transactions",
            get(transaction_apis::list_transactions).post(transaction_apis::create_transaction),
        )
        .route(
            "/api/transactions/:id",
            put(transaction_apis::update_transaction)
                .delete(transaction_apis::delete_transaction),
        )
        .route(
            "/api/transactions/:id/pay",
            post(transaction_apis::mark_paid),
        )
        .route(
            "/api/recurring/generate",
            post(recurring_apis::generate_recurring),
        )
        .route(
            "/api/dashboard/summary",
            get(dashboard_apis::monthly_summary),
        )
        .with_state(state)
}

/// Extract the authenticated user ID from the request headers.
pub(crate) fn require_user_id(headers: &HeaderMap) -> Result<String, Response> {
    match headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(user_id) if !user_id.is_empty() => Ok(user_id.to_string()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(shared::ErrorResponse {
                error: "Missing X-User-Id header".to_string(),
            }),
        )
            .into_response()),
    }
}

/// Translate a domain error into an HTTP response.
pub(crate) fn domain_error_response(e: DomainError) -> Response {
    let (status, message) = match &e {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        DomainError::Storage(inner) => {
            error!(error = %inner, "Storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal storage error".to_string(),
            )
        }
    };
    (status, Json(shared::ErrorResponse { error: message })).into_response()
}
