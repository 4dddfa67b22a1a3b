//! SQLite-backed transaction repository.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;

use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::TransactionStorage;

/// Repository for transaction operations
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let kind: String = row.get("kind");
        let kind = TransactionKind::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown transaction kind in store: {}", kind))?;

        let is_paid: i64 = row.get("is_paid");
        let is_recurring: i64 = row.get("is_recurring");

        Ok(Transaction {
            id: row.get("id"),
            user_id: row.get("user_id"),
            contact_id: row.get("contact_id"),
            description: row.get("description"),
            amount: row.get("amount"),
            launch_date: row.get("launch_date"),
            due_date: row.get("due_date"),
            kind,
            is_paid: is_paid != 0,
            paid_date: row.get("paid_date"),
            is_recurring: is_recurring != 0,
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, contact_id, description, amount,
                launch_date, due_date, kind, is_paid, paid_date, is_recurring,
                created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .bind(&transaction.contact_id)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(transaction.launch_date)
        .bind(transaction.due_date)
        .bind(transaction.kind.as_str())
        .bind(transaction.is_paid as i64)
        .bind(transaction.paid_date)
        .bind(transaction.is_recurring as i64)
        .bind(transaction.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, contact_id, description, amount,
                   launch_date, due_date, kind, is_paid, paid_date, is_recurring,
                   created_at
            FROM transactions
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(transaction_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_transaction(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, contact_id, description, amount,
                   launch_date, due_date, kind, is_paid, paid_date, is_recurring,
                   created_at
            FROM transactions
            WHERE user_id = ?
            ORDER BY due_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    async fn list_transactions_by_period(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, contact_id, description, amount,
                   launch_date, due_date, kind, is_paid, paid_date, is_recurring,
                   created_at
            FROM transactions
            WHERE user_id = ? AND due_date >= ? AND due_date <= ?
            ORDER BY due_date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET contact_id = ?, description = ?, amount = ?,
                launch_date = ?, due_date = ?, kind = ?,
                is_paid = ?, paid_date = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&transaction.contact_id)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(transaction.launch_date)
        .bind(transaction.due_date)
        .bind(transaction.kind.as_str())
        .bind(transaction.is_paid as i64)
        .bind(transaction.paid_date)
        .bind(&transaction.user_id)
        .bind(&transaction.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(transaction_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn setup_test() -> TransactionRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        TransactionRepository::new(db)
    }

    fn sample_transaction(user_id: &str, due: NaiveDate) -> Transaction {
        Transaction {
            id: Transaction::generate_id(TransactionKind::Income, Transaction::now_millis()),
            user_id: user_id.to_string(),
            contact_id: None,
            description: "Consulting fee".to_string(),
            amount: 100.0,
            launch_date: due,
            due_date: due,
            kind: TransactionKind::Income,
            is_paid: false,
            paid_date: None,
            is_recurring: false,
            created_at: Utc::now(),
        }
    }

    fn recurring_for(contact_id: &str, launch: NaiveDate) -> Transaction {
        Transaction {
            id: format!("tx::income::{}::{}", launch, contact_id),
            user_id: "user-1".to_string(),
            contact_id: Some(contact_id.to_string()),
            description: "Cobrança mensal - Acme".to_string(),
            amount: 250.0,
            launch_date: launch,
            due_date: launch,
            kind: TransactionKind::Income,
            is_paid: false,
            paid_date: None,
            is_recurring: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_transaction() {
        let repo = setup_test().await;
        let tx = sample_transaction("user-1", NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());

        repo.store_transaction(&tx).await.expect("Failed to store");

        let found = repo
            .get_transaction("user-1", &tx.id)
            .await
            .expect("Failed to get")
            .expect("Transaction not found");
        assert_eq!(found.description, "Consulting fee");
        assert_eq!(found.due_date, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        assert!(!found.is_recurring);
        assert!(found.paid_date.is_none());
    }

    #[tokio::test]
    async fn test_list_transactions_due_date_descending() {
        let repo = setup_test().await;
        let early = sample_transaction("user-1", NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        let late = sample_transaction("user-1", NaiveDate::from_ymd_opt(2024, 6, 25).unwrap());
        repo.store_transaction(&early).await.expect("Failed to store");
        repo.store_transaction(&late).await.expect("Failed to store");

        let listed = repo.list_transactions("user-1").await.expect("Failed to list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, late.id);
        assert_eq!(listed[1].id, early.id);
    }

    #[tokio::test]
    async fn test_list_transactions_by_period_inclusive() {
        let repo = setup_test().await;
        for day in [1, 15, 30] {
            let tx = sample_transaction("user-1", NaiveDate::from_ymd_opt(2024, 6, day).unwrap());
            repo.store_transaction(&tx).await.expect("Failed to store");
        }

        let listed = repo
            .list_transactions_by_period(
                "user-1",
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            )
            .await
            .expect("Failed to list");
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_recurring_month_rejected() {
        let repo = setup_test().await;
        let launch = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();

        let first = recurring_for("c1", launch);
        repo.store_transaction(&first).await.expect("Failed to store");

        // Same contact, same month, different id and day
        let mut second = recurring_for("c1", NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        second.id = "tx::income::other::c1".to_string();
        let result = repo.store_transaction(&second).await;
        assert!(result.is_err(), "Unique index must reject a second recurring transaction in the month");

        // A different month for the same contact is fine
        let next_month = recurring_for("c1", NaiveDate::from_ymd_opt(2024, 7, 5).unwrap());
        repo.store_transaction(&next_month)
            .await
            .expect("Next month must be accepted");

        // A different contact in the same month is fine
        let other_contact = recurring_for("c2", launch);
        repo.store_transaction(&other_contact)
            .await
            .expect("Other contact must be accepted");
    }

    #[tokio::test]
    async fn test_non_recurring_not_constrained() {
        let repo = setup_test().await;
        let due = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let mut a = sample_transaction("user-1", due);
        a.contact_id = Some("c1".to_string());
        let mut b = sample_transaction("user-1", due);
        b.contact_id = Some("c1".to_string());
        b.id = format!("{}-b", b.id);

        repo.store_transaction(&a).await.expect("Failed to store");
        repo.store_transaction(&b)
            .await
            .expect("Manual transactions are not subject to the recurring index");
    }

    #[tokio::test]
    async fn test_update_transaction_paid_state() {
        let repo = setup_test().await;
        let mut tx = sample_transaction("user-1", NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        repo.store_transaction(&tx).await.expect("Failed to store");

        tx.is_paid = true;
        tx.paid_date = NaiveDate::from_ymd_opt(2024, 6, 18);
        repo.update_transaction(&tx).await.expect("Failed to update");

        let found = repo
            .get_transaction("user-1", &tx.id)
            .await
            .expect("Failed to get")
            .expect("Transaction not found");
        assert!(found.is_paid);
        assert_eq!(found.paid_date, NaiveDate::from_ymd_opt(2024, 6, 18));
    }

    #[tokio::test]
    async fn test_delete_transaction() {
        let repo = setup_test().await;
        let tx = sample_transaction("user-1", NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        repo.store_transaction(&tx).await.expect("Failed to store");

        assert!(repo
            .delete_transaction("user-1", &tx.id)
            .await
            .expect("Failed to delete"));
        assert!(!repo
            .delete_transaction("user-1", &tx.id)
            .await
            .expect("Failed to re-delete"));
    }
}
