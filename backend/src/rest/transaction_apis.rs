//! Transaction endpoints.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::commands::transactions::{
    CreateTransactionCommand, MarkPaidCommand, UpdateTransactionCommand,
};
use crate::domain::errors::DomainError;
use crate::rest::mappers::{
    parse_date, parse_optional_date, transaction_kind_to_domain, transaction_to_dto,
};
use crate::rest::{domain_error_response, require_user_id, AppState};

/// Query parameters for the transaction list endpoint. When both bounds are
/// present the list is restricted to due dates within the period.
#[derive(Deserialize, Debug)]
pub struct TransactionListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TransactionListQuery>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(?query, "GET /api/transactions");

    let result = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => {
            let range = parse_date(start, "start date")
                .and_then(|s| parse_date(end, "end date").map(|e| (s, e)));
            match range {
                Ok((start, end)) => {
                    state
                        .transaction_service
                        .list_transactions_by_period(&user_id, start, end)
                        .await
                }
                Err(e) => return domain_error_response(e),
            }
        }
        (None, None) => state.transaction_service.list_transactions(&user_id).await,
        _ => {
            return domain_error_response(DomainError::validation(
                "start_date and end_date must be provided together",
            ))
        }
    };

    match result {
        Ok(result) => (
            StatusCode::OK,
            Json(shared::TransactionListResponse {
                transactions: result.transactions.iter().map(transaction_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<shared::CreateTransactionRequest>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(description = %request.description, "POST /api/transactions");

    let command = match build_create_command(user_id, request) {
        Ok(command) => command,
        Err(e) => return domain_error_response(e),
    };

    match state.transaction_service.create_transaction(command).await {
        Ok(transaction) => {
            (StatusCode::CREATED, Json(transaction_to_dto(&transaction))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/transactions/:id
pub async fn update_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(transaction_id): Path<String>,
    Json(request): Json<shared::UpdateTransactionRequest>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(transaction_id, "PUT /api/transactions/:id");

    let command = match build_update_command(user_id, transaction_id, request) {
        Ok(command) => command,
        Err(e) => return domain_error_response(e),
    };

    match state.transaction_service.update_transaction(command).await {
        Ok(transaction) => (StatusCode::OK, Json(transaction_to_dto(&transaction))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/transactions/:id/pay
pub async fn mark_paid(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(transaction_id): Path<String>,
    Json(request): Json<shared::MarkPaidRequest>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(transaction_id, is_paid = request.is_paid, "POST /api/transactions/:id/pay");

    let paid_date = match parse_optional_date(request.paid_date.as_deref(), "paid date") {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };

    let command = MarkPaidCommand {
        user_id,
        transaction_id,
        is_paid: request.is_paid,
        paid_date,
    };

    match state.transaction_service.mark_paid(command).await {
        Ok(transaction) => (StatusCode::OK, Json(transaction_to_dto(&transaction))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(transaction_id): Path<String>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(transaction_id, "DELETE /api/transactions/:id");

    match state
        .transaction_service
        .delete_transaction(&user_id, &transaction_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

fn build_create_command(
    user_id: String,
    request: shared::CreateTransactionRequest,
) -> Result<CreateTransactionCommand, DomainError> {
    Ok(CreateTransactionCommand {
        user_id,
        contact_id: request.contact_id,
        description: request.description,
        amount: request.amount,
        launch_date: parse_date(&request.launch_date, "launch date")?,
        due_date: parse_date(&request.due_date, "due date")?,
        kind: transaction_kind_to_domain(request.kind),
        is_paid: request.is_paid,
        paid_date: parse_optional_date(request.paid_date.as_deref(), "paid date")?,
    })
}

fn build_update_command(
    user_id: String,
    transaction_id: String,
    request: shared::UpdateTransactionRequest,
) -> Result<UpdateTransactionCommand, DomainError> {
    Ok(UpdateTransactionCommand {
        user_id,
        transaction_id,
        contact_id: request.contact_id,
        description: request.description,
        amount: request.amount,
        launch_date: parse_date(&request.launch_date, "launch date")?,
        due_date: parse_date(&request.due_date, "due date")?,
        kind: transaction_kind_to_domain(request.kind),
        is_paid: request.is_paid,
        paid_date: parse_optional_date(request.paid_date.as_deref(), "paid date")?,
    })
}
