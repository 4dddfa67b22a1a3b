//! Transaction management: CRUD, paid-state toggling and dashboard figures.

use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::transactions::{
    CreateTransactionCommand, MarkPaidCommand, MonthlySummaryResult, TransactionListResult,
    UpdateTransactionCommand,
};
use crate::domain::errors::DomainError;
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::storage::traits::{ContactStorage, TransactionStorage};

const MAX_DESCRIPTION_LEN: usize = 256;

#[derive(Clone)]
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionStorage>,
    contact_repository: Arc<dyn ContactStorage>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionStorage>,
        contact_repository: Arc<dyn ContactStorage>,
    ) -> Self {
        Self {
            transaction_repository,
            contact_repository,
        }
    }

    pub async fn create_transaction(
        &self,
        command: CreateTransactionCommand,
    ) -> Result<Transaction, DomainError> {
        validate_description(&command.description)?;
        validate_amount(command.amount)?;
        validate_paid_state(command.is_paid, command.paid_date)?;
        self.validate_contact_reference(&command.user_id, command.contact_id.as_deref())
            .await?;

        let transaction = Transaction {
            id: Transaction::generate_id(command.kind, Transaction::now_millis()),
            user_id: command.user_id,
            contact_id: command.contact_id,
            description: command.description,
            amount: command.amount,
            launch_date: command.launch_date,
            due_date: command.due_date,
            kind: command.kind,
            is_paid: command.is_paid,
            paid_date: command.paid_date,
            is_recurring: false,
            created_at: Utc::now(),
        };

        self.transaction_repository
            .store_transaction(&transaction)
            .await?;
        info!(
            transaction_id = %transaction.id,
            amount = transaction.amount,
            "Created transaction"
        );

        Ok(transaction)
    }

    pub async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction, DomainError> {
        self.transaction_repository
            .get_transaction(user_id, transaction_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Transaction not found: {}", transaction_id))
            })
    }

    pub async fn list_transactions(
        &self,
        user_id: &str,
    ) -> Result<TransactionListResult, DomainError> {
        let transactions = self.transaction_repository.list_transactions(user_id).await?;
        Ok(TransactionListResult { transactions })
    }

    /// List transactions whose due date falls within [start, end].
    pub async fn list_transactions_by_period(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TransactionListResult, DomainError> {
        if start > end {
            return Err(DomainError::validation(
                "Invalid period: start date must not be after end date",
            ));
        }
        let transactions = self
            .transaction_repository
            .list_transactions_by_period(user_id, start, end)
            .await?;
        Ok(TransactionListResult { transactions })
    }

    /// Replace the mutable fields of a transaction. The `is_recurring` flag
    /// is owned by the generator and survives user edits unchanged.
    pub async fn update_transaction(
        &self,
        command: UpdateTransactionCommand,
    ) -> Result<Transaction, DomainError> {
        validate_description(&command.description)?;
        validate_amount(command.amount)?;
        validate_paid_state(command.is_paid, command.paid_date)?;
        self.validate_contact_reference(&command.user_id, command.contact_id.as_deref())
            .await?;

        let mut transaction = self
            .get_transaction(&command.user_id, &command.transaction_id)
            .await?;

        transaction.contact_id = command.contact_id;
        transaction.description = command.description;
        transaction.amount = command.amount;
        transaction.launch_date = command.launch_date;
        transaction.due_date = command.due_date;
        transaction.kind = command.kind;
        transaction.is_paid = command.is_paid;
        transaction.paid_date = command.paid_date;

        self.transaction_repository
            .update_transaction(&transaction)
            .await?;
        info!(transaction_id = %transaction.id, "Updated transaction");

        Ok(transaction)
    }

    /// Toggle the paid state. Marking as paid records the payment date
    /// (defaulting to today); unmarking clears it, so `paid_date` is present
    /// exactly when `is_paid` is true.
    pub async fn mark_paid(&self, command: MarkPaidCommand) -> Result<Transaction, DomainError> {
        let mut transaction = self
            .get_transaction(&command.user_id, &command.transaction_id)
            .await?;

        if command.is_paid {
            transaction.is_paid = true;
            transaction.paid_date =
                Some(command.paid_date.unwrap_or_else(|| Utc::now().date_naive()));
        } else {
            transaction.is_paid = false;
            transaction.paid_date = None;
        }

        self.transaction_repository
            .update_transaction(&transaction)
            .await?;
        info!(
            transaction_id = %transaction.id,
            is_paid = transaction.is_paid,
            "Toggled paid state"
        );

        Ok(transaction)
    }

    pub async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<(), DomainError> {
        let deleted = self
            .transaction_repository
            .delete_transaction(user_id, transaction_id)
            .await?;
        if !deleted {
            warn!(transaction_id, "No transaction found to delete");
            return Err(DomainError::not_found(format!(
                "Transaction not found: {}",
                transaction_id
            )));
        }
        info!(transaction_id, "Deleted transaction");
        Ok(())
    }

    /// Dashboard figures for the month `today` falls in: totals per kind,
    /// balance, and how many transactions are still pending or overdue.
    pub async fn monthly_summary(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<MonthlySummaryResult, DomainError> {
        let transactions = self.transaction_repository.list_transactions(user_id).await?;

        let current_month: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.due_date.month() == today.month() && t.due_date.year() == today.year())
            .collect();

        let total_income: f64 = current_month
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let total_expenses: f64 = current_month
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        let pending: Vec<&&Transaction> =
            current_month.iter().filter(|t| !t.is_paid).collect();
        let overdue_count = pending.iter().filter(|t| t.due_date < today).count() as u32;

        Ok(MonthlySummaryResult {
            month: today.month(),
            year: today.year(),
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            pending_count: pending.len() as u32,
            overdue_count,
        })
    }

    async fn validate_contact_reference(
        &self,
        user_id: &str,
        contact_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let Some(contact_id) = contact_id else {
            return Ok(());
        };
        if self
            .contact_repository
            .get_contact(user_id, contact_id)
            .await?
            .is_none()
        {
            return Err(DomainError::validation(format!(
                "Contact not found: {}",
                contact_id
            )));
        }
        Ok(())
    }
}

fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::validation(format!(
            "Description must be between 1 and {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), DomainError> {
    if amount <= 0.0 {
        return Err(DomainError::validation("Amount must be positive"));
    }
    if amount > 1_000_000_000.0 {
        return Err(DomainError::validation("Amount is too large"));
    }
    Ok(())
}

fn validate_paid_state(is_paid: bool, paid_date: Option<NaiveDate>) -> Result<(), DomainError> {
    match (is_paid, paid_date) {
        (true, None) => Err(DomainError::validation(
            "A paid transaction must carry a payment date",
        )),
        (false, Some(_)) => Err(DomainError::validation(
            "An unpaid transaction cannot carry a payment date",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::contacts::CreateContactCommand;
    use crate::domain::contact_service::ContactService;
    use crate::domain::models::contact::{ContactKind, RecurringCharge};
    use crate::storage::sqlite::{ContactRepository, DbConnection, TransactionRepository};

    async fn setup_test() -> (TransactionService, ContactService) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let contact_repo = Arc::new(ContactRepository::new(db.clone()));
        let tx_repo = Arc::new(TransactionRepository::new(db));
        (
            TransactionService::new(tx_repo, contact_repo.clone()),
            ContactService::new(contact_repo),
        )
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_command(kind: TransactionKind, due: NaiveDate) -> CreateTransactionCommand {
        CreateTransactionCommand {
            user_id: "user-1".to_string(),
            contact_id: None,
            description: "Office supplies".to_string(),
            amount: 50.0,
            launch_date: due,
            due_date: due,
            kind,
            is_paid: false,
            paid_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_transaction() {
        let (service, _) = setup_test().await;
        let created = service
            .create_transaction(create_command(
                TransactionKind::Expense,
                day(2024, 6, 20),
            ))
            .await
            .expect("Failed to create transaction");

        assert!(!created.is_recurring);
        let found = service
            .get_transaction("user-1", &created.id)
            .await
            .expect("Failed to get transaction");
        assert_eq!(found.id, created.id);
        assert_eq!(found.description, created.description);
        assert_eq!(found.due_date, created.due_date);
        assert_eq!(found.kind, TransactionKind::Expense);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_payloads() {
        let (service, _) = setup_test().await;

        let mut command = create_command(TransactionKind::Income, day(2024, 6, 20));
        command.description = String::new();
        assert!(matches!(
            service.create_transaction(command).await,
            Err(DomainError::Validation(_))
        ));

        let mut command = create_command(TransactionKind::Income, day(2024, 6, 20));
        command.amount = -10.0;
        assert!(matches!(
            service.create_transaction(command).await,
            Err(DomainError::Validation(_))
        ));

        // paid without a payment date
        let mut command = create_command(TransactionKind::Income, day(2024, 6, 20));
        command.is_paid = true;
        assert!(matches!(
            service.create_transaction(command).await,
            Err(DomainError::Validation(_))
        ));

        // payment date without being paid
        let mut command = create_command(TransactionKind::Income, day(2024, 6, 20));
        command.paid_date = Some(day(2024, 6, 18));
        assert!(matches!(
            service.create_transaction(command).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_description_length_counts_characters() {
        let (service, _) = setup_test().await;

        // Multibyte text at the limit is still 256 characters
        let mut command = create_command(TransactionKind::Expense, day(2024, 6, 20));
        command.description = "ã".repeat(256);
        service
            .create_transaction(command)
            .await
            .expect("256-character description must be accepted");

        let mut command = create_command(TransactionKind::Expense, day(2024, 6, 20));
        command.description = "ã".repeat(257);
        assert!(matches!(
            service.create_transaction(command).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_contact() {
        let (service, _) = setup_test().await;
        let mut command = create_command(TransactionKind::Income, day(2024, 6, 20));
        command.contact_id = Some("missing".to_string());
        assert!(matches!(
            service.create_transaction(command).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_with_existing_contact() {
        let (service, contacts) = setup_test().await;
        let contact = contacts
            .create_contact(CreateContactCommand {
                user_id: "user-1".to_string(),
                name: "Acme".to_string(),
                kind: ContactKind::Company,
                email: None,
                recurring_charge: RecurringCharge::Inactive,
            })
            .await
            .expect("Failed to create contact");

        let mut command = create_command(TransactionKind::Income, day(2024, 6, 20));
        command.contact_id = Some(contact.id.clone());
        let created = service
            .create_transaction(command)
            .await
            .expect("Failed to create transaction");
        assert_eq!(created.contact_id, Some(contact.id));
    }

    #[tokio::test]
    async fn test_mark_paid_round_trip() {
        let (service, _) = setup_test().await;
        let created = service
            .create_transaction(create_command(TransactionKind::Income, day(2024, 6, 20)))
            .await
            .expect("Failed to create transaction");

        let paid = service
            .mark_paid(MarkPaidCommand {
                user_id: "user-1".to_string(),
                transaction_id: created.id.clone(),
                is_paid: true,
                paid_date: Some(day(2024, 6, 18)),
            })
            .await
            .expect("Failed to mark paid");
        assert!(paid.is_paid);
        assert_eq!(paid.paid_date, Some(day(2024, 6, 18)));

        let unpaid = service
            .mark_paid(MarkPaidCommand {
                user_id: "user-1".to_string(),
                transaction_id: created.id.clone(),
                is_paid: false,
                paid_date: None,
            })
            .await
            .expect("Failed to unmark paid");
        assert!(!unpaid.is_paid);
        assert!(unpaid.paid_date.is_none(), "paid_date must clear with is_paid");
    }

    #[tokio::test]
    async fn test_update_preserves_recurring_flag() {
        let (service, _) = setup_test().await;
        let created = service
            .create_transaction(create_command(TransactionKind::Income, day(2024, 6, 20)))
            .await
            .expect("Failed to create transaction");

        let updated = service
            .update_transaction(UpdateTransactionCommand {
                user_id: "user-1".to_string(),
                transaction_id: created.id.clone(),
                contact_id: None,
                description: "Updated description".to_string(),
                amount: 75.0,
                launch_date: day(2024, 6, 1),
                due_date: day(2024, 6, 25),
                kind: TransactionKind::Expense,
                is_paid: false,
                paid_date: None,
            })
            .await
            .expect("Failed to update transaction");

        assert_eq!(updated.description, "Updated description");
        assert_eq!(updated.amount, 75.0);
        assert_eq!(updated.kind, TransactionKind::Expense);
        assert!(!updated.is_recurring);
    }

    #[tokio::test]
    async fn test_list_by_period_validates_range() {
        let (service, _) = setup_test().await;
        let result = service
            .list_transactions_by_period("user-1", day(2024, 7, 1), day(2024, 6, 1))
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_monthly_summary() {
        let (service, _) = setup_test().await;
        let today = day(2024, 6, 15);

        // Paid income this month
        let mut command = create_command(TransactionKind::Income, day(2024, 6, 5));
        command.amount = 1000.0;
        command.is_paid = true;
        command.paid_date = Some(day(2024, 6, 5));
        service.create_transaction(command).await.expect("create");

        // Unpaid expense, already overdue
        let mut command = create_command(TransactionKind::Expense, day(2024, 6, 10));
        command.amount = 300.0;
        service.create_transaction(command).await.expect("create");

        // Unpaid income, due later this month
        let mut command = create_command(TransactionKind::Income, day(2024, 6, 25));
        command.amount = 200.0;
        service.create_transaction(command).await.expect("create");

        // Transaction in another month is ignored
        let mut command = create_command(TransactionKind::Expense, day(2024, 7, 1));
        command.amount = 999.0;
        service.create_transaction(command).await.expect("create");

        let summary = service
            .monthly_summary("user-1", today)
            .await
            .expect("Failed to summarize");

        assert_eq!(summary.month, 6);
        assert_eq!(summary.year, 2024);
        assert_eq!(summary.total_income, 1200.0);
        assert_eq!(summary.total_expenses, 300.0);
        assert_eq!(summary.balance, 900.0);
        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.overdue_count, 1);
    }
}
