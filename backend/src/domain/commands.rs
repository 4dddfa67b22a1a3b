//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod contacts {
    use crate::domain::models::contact::{Contact, ContactKind, RecurringCharge};

    /// Input for creating a new contact.
    #[derive(Debug, Clone)]
    pub struct CreateContactCommand {
        pub user_id: String,
        pub name: String,
        pub kind: ContactKind,
        pub email: Option<String>,
        pub recurring_charge: RecurringCharge,
    }

    /// Input for updating an existing contact.
    #[derive(Debug, Clone)]
    pub struct UpdateContactCommand {
        pub user_id: String,
        pub contact_id: String,
        pub name: String,
        pub kind: ContactKind,
        pub email: Option<String>,
        pub recurring_charge: RecurringCharge,
    }

    /// Result of listing contacts.
    #[derive(Debug, Clone)]
    pub struct ContactListResult {
        pub contacts: Vec<Contact>,
    }
}

pub mod transactions {
    use crate::domain::models::transaction::{Transaction, TransactionKind};
    use chrono::NaiveDate;

    /// Input for creating a new transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub user_id: String,
        pub contact_id: Option<String>,
        pub description: String,
        pub amount: f64,
        pub launch_date: NaiveDate,
        pub due_date: NaiveDate,
        pub kind: TransactionKind,
        pub is_paid: bool,
        pub paid_date: Option<NaiveDate>,
    }

    /// Input for replacing the mutable fields of a transaction.
    #[derive(Debug, Clone)]
    pub struct UpdateTransactionCommand {
        pub user_id: String,
        pub transaction_id: String,
        pub contact_id: Option<String>,
        pub description: String,
        pub amount: f64,
        pub launch_date: NaiveDate,
        pub due_date: NaiveDate,
        pub kind: TransactionKind,
        pub is_paid: bool,
        pub paid_date: Option<NaiveDate>,
    }

    /// Input for toggling the paid state of a transaction.
    #[derive(Debug, Clone)]
    pub struct MarkPaidCommand {
        pub user_id: String,
        pub transaction_id: String,
        pub is_paid: bool,
        /// Defaults to today when marking as paid and no date is given.
        pub paid_date: Option<NaiveDate>,
    }

    /// Result of listing transactions.
    #[derive(Debug, Clone)]
    pub struct TransactionListResult {
        pub transactions: Vec<Transaction>,
    }

    /// Current-month dashboard figures.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MonthlySummaryResult {
        pub month: u32,
        pub year: i32,
        pub total_income: f64,
        pub total_expenses: f64,
        pub balance: f64,
        pub pending_count: u32,
        pub overdue_count: u32,
    }
}
