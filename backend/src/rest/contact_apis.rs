//! Contact endpoints.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::domain::commands::contacts::{CreateContactCommand, UpdateContactCommand};
use crate::rest::mappers::{contact_kind_to_domain, contact_to_dto, recurring_charge_to_domain};
use crate::rest::{domain_error_response, require_user_id, AppState};

/// GET /api/contacts
pub async fn list_contacts(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!("GET /api/contacts");

    match state.contact_service.list_contacts(&user_id).await {
        Ok(result) => (
            StatusCode::OK,
            Json(shared::ContactListResponse {
                contacts: result.contacts.iter().map(contact_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<shared::CreateContactRequest>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(name = %request.name, "POST /api/contacts");

    let command = CreateContactCommand {
        user_id,
        name: request.name,
        kind: contact_kind_to_domain(request.kind),
        email: request.email,
        recurring_charge: recurring_charge_to_domain(request.recurring_charge),
    };

    match state.contact_service.create_contact(command).await {
        Ok(contact) => (StatusCode::CREATED, Json(contact_to_dto(&contact))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/contacts/:id
pub async fn update_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(contact_id): Path<String>,
    Json(request): Json<shared::UpdateContactRequest>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(contact_id, "PUT /api/contacts/:id");

    let command = UpdateContactCommand {
        user_id,
        contact_id,
        name: request.name,
        kind: contact_kind_to_domain(request.kind),
        email: request.email,
        recurring_charge: recurring_charge_to_domain(request.recurring_charge),
    };

    match state.contact_service.update_contact(command).await {
        Ok(contact) => (StatusCode::OK, Json(contact_to_dto(&contact))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/contacts/:id
pub async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(contact_id): Path<String>,
) -> Response {
    let user_id = match require_user_id(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    info!(contact_id, "DELETE /api/contacts/:id");

    match state
        .contact_service
        .delete_contact(&user_id, &contact_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
