use serde::{Deserialize, Serialize};

/// A contact the user transacts with: a company or an individual client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// "company" or "client"
    pub kind: ContactKind,
    pub email: Option<String>,
    /// Monthly billing rule, if one is configured and switched on.
    pub recurring_charge: Option<RecurringChargeDto>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Kind of contact for filtering and rendering purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Company,
    Client,
}

/// Recurring billing rule attached to a contact.
///
/// Only returned when the rule is active; an inactive or absent rule is
/// represented as `None` on the contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringChargeDto {
    /// Monthly amount charged to the contact (must be positive)
    pub amount: f64,
    /// Day-of-month the transaction is launched (1-31)
    pub launch_day: u32,
    /// Day-of-month the payment is due (1-31)
    pub due_day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub kind: ContactKind,
    pub email: Option<String>,
    pub recurring_charge: Option<RecurringChargeDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    pub name: String,
    pub kind: ContactKind,
    pub email: Option<String>,
    pub recurring_charge: Option<RecurringChargeDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
}

/// A single income or expense record, optionally linked to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Weak reference to the contact this transaction belongs to
    pub contact_id: Option<String>,
    /// Description of the transaction (max 256 characters)
    pub description: String,
    /// Transaction amount (always positive; direction carried by `kind`)
    pub amount: f64,
    /// Date the transaction is launched (YYYY-MM-DD)
    pub launch_date: String,
    /// Date the payment is due (YYYY-MM-DD)
    pub due_date: String,
    pub kind: TransactionKind,
    pub is_paid: bool,
    /// Date the payment was made (YYYY-MM-DD); present iff `is_paid`
    pub paid_date: Option<String>,
    /// True only for transactions produced by the recurring-charge generator
    pub is_recurring: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub contact_id: Option<String>,
    pub description: String,
    pub amount: f64,
    /// Launch date (YYYY-MM-DD)
    pub launch_date: String,
    /// Due date (YYYY-MM-DD)
    pub due_date: String,
    pub kind: TransactionKind,
    #[serde(default)]
    pub is_paid: bool,
    /// Required when `is_paid` is true (YYYY-MM-DD)
    pub paid_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    pub contact_id: Option<String>,
    pub description: String,
    pub amount: f64,
    pub launch_date: String,
    pub due_date: String,
    pub kind: TransactionKind,
    pub is_paid: bool,
    pub paid_date: Option<String>,
}

/// Request to toggle the paid state of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    pub is_paid: bool,
    /// Payment date (YYYY-MM-DD); defaults to today when marking as paid
    pub paid_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

/// Result of a recurring-charge generator run.
///
/// `created` holds the transactions materialized by this run so the client can
/// merge them into its state without a full reload. `failures` reports the
/// contacts whose transaction could not be persisted; the run continues past
/// them (partial-success semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRecurringResponse {
    pub created: Vec<Transaction>,
    pub failures: Vec<GenerationFailureDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationFailureDto {
    pub contact_id: String,
    pub contact_name: String,
    pub error: String,
}

/// Current-month dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: f64,
    pub total_expenses: f64,
    /// total_income - total_expenses
    pub balance: f64,
    /// Transactions due this month that are not yet paid
    pub pending_count: u32,
    /// Pending transactions whose due date has already passed
    pub overdue_count: u32,
}

/// Error payload returned by the REST layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
