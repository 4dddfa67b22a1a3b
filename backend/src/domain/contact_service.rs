//! Contact management: CRUD plus validation of the recurring billing rule.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::contacts::{
    ContactListResult, CreateContactCommand, UpdateContactCommand,
};
use crate::domain::errors::DomainError;
use crate::domain::models::contact::{Contact, RecurringCharge};
use crate::storage::traits::ContactStorage;

const MAX_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 254;

/// Service for managing contacts
#[derive(Clone)]
pub struct ContactService {
    contact_repository: Arc<dyn ContactStorage>,
}

impl ContactService {
    pub fn new(contact_repository: Arc<dyn ContactStorage>) -> Self {
        Self { contact_repository }
    }

    /// Create a new contact. An invalid recurring-charge configuration is
    /// rejected here, at save time, so the generator never sees one.
    pub async fn create_contact(
        &self,
        command: CreateContactCommand,
    ) -> Result<Contact, DomainError> {
        validate_name(&command.name)?;
        validate_email(command.email.as_deref())?;
        validate_recurring_charge(&command.recurring_charge)?;

        let now = Utc::now();
        let contact = Contact {
            id: Contact::generate_id(),
            user_id: command.user_id,
            name: command.name,
            kind: command.kind,
            email: command.email,
            recurring_charge: command.recurring_charge,
            created_at: now,
            updated_at: now,
        };

        self.contact_repository.store_contact(&contact).await?;
        info!(contact_id = %contact.id, name = %contact.name, "Created contact");

        Ok(contact)
    }

    pub async fn get_contact(
        &self,
        user_id: &str,
        contact_id: &str,
    ) -> Result<Contact, DomainError> {
        self.contact_repository
            .get_contact(user_id, contact_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Contact not found: {}", contact_id)))
    }

    pub async fn list_contacts(&self, user_id: &str) -> Result<ContactListResult, DomainError> {
        let contacts = self.contact_repository.list_contacts(user_id).await?;
        Ok(ContactListResult { contacts })
    }

    /// Replace the mutable fields of an existing contact.
    pub async fn update_contact(
        &self,
        command: UpdateContactCommand,
    ) -> Result<Contact, DomainError> {
        validate_name(&command.name)?;
        validate_email(command.email.as_deref())?;
        validate_recurring_charge(&command.recurring_charge)?;

        let mut contact = self
            .get_contact(&command.user_id, &command.contact_id)
            .await?;

        contact.name = command.name;
        contact.kind = command.kind;
        contact.email = command.email;
        contact.recurring_charge = command.recurring_charge;
        contact.updated_at = Utc::now();

        self.contact_repository.update_contact(&contact).await?;
        info!(contact_id = %contact.id, "Updated contact");

        Ok(contact)
    }

    pub async fn delete_contact(&self, user_id: &str, contact_id: &str) -> Result<(), DomainError> {
        let deleted = self
            .contact_repository
            .delete_contact(user_id, contact_id)
            .await?;
        if !deleted {
            warn!(contact_id, "No contact found to delete");
            return Err(DomainError::not_found(format!(
                "Contact not found: {}",
                contact_id
            )));
        }
        info!(contact_id, "Deleted contact");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Contact name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "Contact name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Shape check only. Deliverability is not this layer's concern.
fn validate_email(email: Option<&str>) -> Result<(), DomainError> {
    let Some(email) = email else {
        return Ok(());
    };

    let valid = email.chars().count() <= MAX_EMAIL_LEN
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            });
    if !valid {
        return Err(DomainError::validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

fn validate_recurring_charge(charge: &RecurringCharge) -> Result<(), DomainError> {
    let RecurringCharge::Active {
        amount,
        launch_day,
        due_day,
    } = charge
    else {
        return Ok(());
    };

    if *amount <= 0.0 {
        return Err(DomainError::validation(
            "Recurring charge amount must be positive",
        ));
    }
    if !(1..=31).contains(launch_day) {
        return Err(DomainError::validation(format!(
            "Invalid launch day: {}. Must be 1-31",
            launch_day
        )));
    }
    if !(1..=31).contains(due_day) {
        return Err(DomainError::validation(format!(
            "Invalid due day: {}. Must be 1-31",
            due_day
        )));
    }
    Ok(())
}
