//! SQLite-backed contact repository.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::contact::{Contact, ContactKind, RecurringCharge};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::ContactStorage;

/// Repository for contact operations
#[derive(Clone)]
pub struct ContactRepository {
    db: DbConnection,
}

impl ContactRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_contact(row: &sqlx::sqlite::SqliteRow) -> Result<Contact> {
        let kind: String = row.get("kind");
        let kind = ContactKind::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown contact kind in store: {}", kind))?;

        let active: i64 = row.get("recurring_active");
        let amount: Option<f64> = row.get("recurring_amount");
        let launch_day: Option<i64> = row.get("recurring_launch_day");
        let due_day: Option<i64> = row.get("recurring_due_day");

        // A row flagged active but missing any rule field collapses to
        // Inactive rather than surfacing a half-built rule.
        let recurring_charge = match (active != 0, amount, launch_day, due_day) {
            (true, Some(amount), Some(launch_day), Some(due_day)) => RecurringCharge::Active {
                amount,
                launch_day: launch_day as u32,
                due_day: due_day as u32,
            },
            _ => RecurringCharge::Inactive,
        };

        Ok(Contact {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            kind,
            email: row.get("email"),
            recurring_charge,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn charge_columns(charge: &RecurringCharge) -> (i64, Option<f64>, Option<i64>, Option<i64>) {
        match charge {
            RecurringCharge::Active {
                amount,
                launch_day,
                due_day,
            } => (1, Some(*amount), Some(*launch_day as i64), Some(*due_day as i64)),
            RecurringCharge::Inactive => (0, None, None, None),
        }
    }
}

#[async_trait]
impl ContactStorage for ContactRepository {
    async fn store_contact(&self, contact: &Contact) -> Result<()> {
        let (active, amount, launch_day, due_day) = Self::charge_columns(&contact.recurring_charge);
        sqlx::query(
            r#"
            INSERT INTO contacts (
                id, user_id, name, kind, email,
                recurring_active, recurring_amount, recurring_launch_day, recurring_due_day,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contact.id)
        .bind(&contact.user_id)
        .bind(&contact.name)
        .bind(contact.kind.as_str())
        .bind(&contact.email)
        .bind(active)
        .bind(amount)
        .bind(launch_day)
        .bind(due_day)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_contact(&self, user_id: &str, contact_id: &str) -> Result<Option<Contact>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, kind, email,
                   recurring_active, recurring_amount, recurring_launch_day, recurring_due_day,
                   created_at, updated_at
            FROM contacts
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(contact_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_contact(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_contacts(&self, user_id: &str) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, kind, email,
                   recurring_active, recurring_amount, recurring_launch_day, recurring_due_day,
                   created_at, updated_at
            FROM contacts
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_contact).collect()
    }

    async fn update_contact(&self, contact: &Contact) -> Result<()> {
        let (active, amount, launch_day, due_day) = Self::charge_columns(&contact.recurring_charge);
        sqlx::query(
            r#"
            UPDATE contacts
            SET name = ?, kind = ?, email = ?,
                recurring_active = ?, recurring_amount = ?,
                recurring_launch_day = ?, recurring_due_day = ?,
                updated_at = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&contact.name)
        .bind(contact.kind.as_str())
        .bind(&contact.email)
        .bind(active)
        .bind(amount)
        .bind(launch_day)
        .bind(due_day)
        .bind(contact.updated_at)
        .bind(&contact.user_id)
        .bind(&contact.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_contact(&self, user_id: &str, contact_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(contact_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
