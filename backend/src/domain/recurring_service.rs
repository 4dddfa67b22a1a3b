//! Recurring-charge generation.
//!
//! Each contact may carry an active monthly billing rule (amount, launch day,
//! due day). Once the launch day of the current month has passed, the
//! generator materializes one income transaction per contact and month. The
//! decision logic is a pure function over the contact list, the already
//! persisted transactions and today's date; the service wrapper owns the
//! store round-trips.

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::errors::DomainError;
use crate::domain::models::contact::{Contact, RecurringCharge};
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::storage::traits::{ContactStorage, TransactionStorage};

/// A recurring transaction the generator has decided to materialize.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringChargePlan {
    pub contact_id: String,
    pub contact_name: String,
    pub description: String,
    pub amount: f64,
    pub launch_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// A contact whose planned transaction could not be persisted.
#[derive(Debug, Clone)]
pub struct GenerationFailure {
    pub contact_id: String,
    pub contact_name: String,
    pub error: String,
}

/// Outcome of a generator run. Partial success is expected: a write failure
/// for one contact does not abort the run for the others.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub created: Vec<Transaction>,
    pub failures: Vec<GenerationFailure>,
}

/// Decide which contacts are due for a monthly charge.
///
/// A contact is due when its recurring charge is active, `today` has reached
/// the launch day, and no recurring transaction for this contact exists in
/// the current calendar month. The caller is responsible for persisting the
/// returned plans and merging the results into its own state.
pub fn plan_recurring_charges(
    contacts: &[Contact],
    existing_transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<RecurringChargePlan> {
    let mut plans = Vec::new();

    for contact in contacts {
        let (amount, launch_day, due_day) = match contact.recurring_charge {
            RecurringCharge::Active {
                amount,
                launch_day,
                due_day,
            } => (amount, launch_day, due_day),
            RecurringCharge::Inactive => continue,
        };

        // A configured day past the end of the month clamps to the month's
        // last day, so the eligibility gate compares the clamped launch date.
        let launch_date = date_in_month(today.year(), today.month(), launch_day);
        let due_date = date_in_month(today.year(), today.month(), due_day);
        let (Some(launch_date), Some(due_date)) = (launch_date, due_date) else {
            continue;
        };

        // Charge is only launched once the launch date has been reached.
        if today < launch_date {
            continue;
        }

        if has_recurring_for_month(existing_transactions, &contact.id, today) {
            continue;
        }

        plans.push(RecurringChargePlan {
            contact_id: contact.id.clone(),
            contact_name: contact.name.clone(),
            description: format!("Cobrança mensal - {}", contact.name),
            amount,
            launch_date,
            due_date,
        });
    }

    plans
}

/// True when a generator-produced transaction for this contact already exists
/// in `today`'s calendar month.
fn has_recurring_for_month(transactions: &[Transaction], contact_id: &str, today: NaiveDate) -> bool {
    transactions.iter().any(|t| {
        t.is_recurring
            && t.contact_id.as_deref() == Some(contact_id)
            && t.launch_date.month() == today.month()
            && t.launch_date.year() == today.year()
    })
}

/// Build the date `(year, month, day)`, clamping a day past the end of the
/// month to the month's last day (e.g. day 31 in June becomes June 30).
fn date_in_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| last_day_of_month(year, month))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Service running the generator against the store.
#[derive(Clone)]
pub struct RecurringChargeService {
    contact_repository: Arc<dyn ContactStorage>,
    transaction_repository: Arc<dyn TransactionStorage>,
}

impl RecurringChargeService {
    pub fn new(
        contact_repository: Arc<dyn ContactStorage>,
        transaction_repository: Arc<dyn TransactionStorage>,
    ) -> Self {
        Self {
            contact_repository,
            transaction_repository,
        }
    }

    /// Run the generator for one user.
    ///
    /// Reads contacts and existing transactions fresh, plans the due charges
    /// and persists them one at a time. A failed read aborts the run; a
    /// failed write is recorded for that contact and the loop continues.
    pub async fn generate_for_user(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<GenerateResult, DomainError> {
        let contacts = self.contact_repository.list_contacts(user_id).await?;
        let existing = self.transaction_repository.list_transactions(user_id).await?;

        let plans = plan_recurring_charges(&contacts, &existing, today);
        info!(
            user_id,
            contacts = contacts.len(),
            due = plans.len(),
            "Planned recurring charges"
        );

        let mut created = Vec::new();
        let mut failures = Vec::new();

        for plan in plans {
            let transaction = Transaction {
                id: Transaction::generate_id(TransactionKind::Income, Transaction::now_millis()),
                user_id: user_id.to_string(),
                contact_id: Some(plan.contact_id.clone()),
                description: plan.description.clone(),
                amount: plan.amount,
                launch_date: plan.launch_date,
                due_date: plan.due_date,
                kind: TransactionKind::Income,
                is_paid: false,
                paid_date: None,
                is_recurring: true,
                created_at: chrono::Utc::now(),
            };

            match self.transaction_repository.store_transaction(&transaction).await {
                Ok(()) => {
                    info!(
                        contact_id = %plan.contact_id,
                        amount = plan.amount,
                        launch_date = %plan.launch_date,
                        "Created recurring transaction"
                    );
                    created.push(transaction);
                }
                Err(e) => {
                    error!(
                        contact_id = %plan.contact_id,
                        error = %e,
                        "Failed to create recurring transaction"
                    );
                    failures.push(GenerationFailure {
                        contact_id: plan.contact_id,
                        contact_name: plan.contact_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(GenerateResult { created, failures })
    }
}
