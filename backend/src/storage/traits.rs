//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. Every
//! operation is scoped by the opaque `user_id` of the owning user; row-level
//! authorization beyond that scoping is the backing store's concern.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::contact::Contact;
use crate::domain::models::transaction::Transaction;

/// Trait defining the interface for contact storage operations
#[async_trait]
pub trait ContactStorage: Send + Sync {
    /// Store a new contact
    async fn store_contact(&self, contact: &Contact) -> Result<()>;

    /// Retrieve a specific contact by ID
    async fn get_contact(&self, user_id: &str, contact_id: &str) -> Result<Option<Contact>>;

    /// List all contacts for a user, newest first
    async fn list_contacts(&self, user_id: &str) -> Result<Vec<Contact>>;

    /// Update an existing contact
    async fn update_contact(&self, contact: &Contact) -> Result<()>;

    /// Delete a contact by ID
    /// Returns true if the contact was found and deleted, false otherwise
    async fn delete_contact(&self, user_id: &str, contact_id: &str) -> Result<bool>;
}

/// Trait defining the interface for transaction storage operations
///
/// The store enforces the one-recurring-transaction-per-contact-per-month
/// invariant: storing a second `is_recurring` transaction for the same
/// contact and calendar month must fail. This closes the check-then-create
/// race between concurrent generator runs.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Store a new transaction
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Retrieve a specific transaction by ID
    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>>;

    /// List all transactions for a user, ordered by due date descending
    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// List transactions whose due date falls within [start, end] (inclusive),
    /// ordered by due date descending
    async fn list_transactions_by_period(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>>;

    /// Update an existing transaction
    async fn update_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Delete a single transaction
    /// Returns true if the transaction was found and deleted, false otherwise
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool>;
}
