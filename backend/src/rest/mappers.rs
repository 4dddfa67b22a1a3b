//! Mapping between the public DTOs in `shared` and the domain models.
//!
//! Dates cross the wire as plain strings (YYYY-MM-DD); parsing failures are
//! reported as validation errors before any service is invoked.

use chrono::NaiveDate;

use crate::domain::errors::DomainError;
use crate::domain::models::contact::{Contact, ContactKind, RecurringCharge};
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::domain::recurring_service::GenerateResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| DomainError::validation(format!("Invalid {}: {} (expected YYYY-MM-DD)", field, value)))
}

pub fn parse_optional_date(
    value: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, DomainError> {
    value.map(|v| parse_date(v, field)).transpose()
}

pub fn contact_kind_to_domain(kind: shared::ContactKind) -> ContactKind {
    match kind {
        shared::ContactKind::Company => ContactKind::Company,
        shared::ContactKind::Client => ContactKind::Client,
    }
}

pub fn contact_kind_to_dto(kind: ContactKind) -> shared::ContactKind {
    match kind {
        ContactKind::Company => shared::ContactKind::Company,
        ContactKind::Client => shared::ContactKind::Client,
    }
}

/// An absent rule in the request maps to `Inactive`; range validation is the
/// contact service's job.
pub fn recurring_charge_to_domain(dto: Option<shared::RecurringChargeDto>) -> RecurringCharge {
    match dto {
        Some(dto) => RecurringCharge::Active {
            amount: dto.amount,
            launch_day: dto.launch_day,
            due_day: dto.due_day,
        },
        None => RecurringCharge::Inactive,
    }
}

pub fn recurring_charge_to_dto(charge: &RecurringCharge) -> Option<shared::RecurringChargeDto> {
    match charge {
        RecurringCharge::Active {
            amount,
            launch_day,
            due_day,
        } => Some(shared::RecurringChargeDto {
            amount: *amount,
            launch_day: *launch_day,
            due_day: *due_day,
        }),
        RecurringCharge::Inactive => None,
    }
}

pub fn contact_to_dto(contact: &Contact) -> shared::Contact {
    shared::Contact {
        id: contact.id.clone(),
        name: contact.name.clone(),
        kind: contact_kind_to_dto(contact.kind),
        email: contact.email.clone(),
        recurring_charge: recurring_charge_to_dto(&contact.recurring_charge),
        created_at: contact.created_at.to_rfc3339(),
        updated_at: contact.updated_at.to_rfc3339(),
    }
}

pub fn transaction_kind_to_domain(kind: shared::TransactionKind) -> TransactionKind {
    match kind {
        shared::TransactionKind::Income => TransactionKind::Income,
        shared::TransactionKind::Expense => TransactionKind::Expense,
    }
}

pub fn transaction_kind_to_dto(kind: TransactionKind) -> shared::TransactionKind {
    match kind {
        TransactionKind::Income => shared::TransactionKind::Income,
        TransactionKind::Expense => shared::TransactionKind::Expense,
    }
}

pub fn transaction_to_dto(transaction: &Transaction) -> shared::Transaction {
    shared::Transaction {
        id: transaction.id.clone(),
        contact_id: transaction.contact_id.clone(),
        description: transaction.description.clone(),
        amount: transaction.amount,
        launch_date: transaction.launch_date.format(DATE_FORMAT).to_string(),
        due_date: transaction.due_date.format(DATE_FORMAT).to_string(),
        kind: transaction_kind_to_dto(transaction.kind),
        is_paid: transaction.is_paid,
        paid_date: transaction
            .paid_date
            .map(|d| d.format(DATE_FORMAT).to_string()),
        is_recurring: transaction.is_recurring,
        created_at: transaction.created_at.to_rfc3339(),
    }
}

pub fn generate_result_to_dto(result: &GenerateResult) -> shared::GenerateRecurringResponse {
    shared::GenerateRecurringResponse {
        created: result.created.iter().map(transaction_to_dto).collect(),
        failures: result
            .failures
            .iter()
            .map(|f| shared::GenerationFailureDto {
                contact_id: f.contact_id.clone(),
                contact_name: f.contact_name.clone(),
                error: f.error.clone(),
            })
            .collect(),
    }
}
